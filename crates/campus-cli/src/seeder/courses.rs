use std::time::Instant;

use anyhow::Result;
use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use sqlx::PgPool;

use super::SEED_COURSE_MARKER;
use super::models::CourseSeed;

const SUBJECTS: [&str; 10] = [
    "Algorithms",
    "Databases",
    "Operating Systems",
    "Networks",
    "Compilers",
    "Linear Algebra",
    "Statistics",
    "Distributed Systems",
    "Computer Graphics",
    "Software Engineering",
];

const PERIODS: [&str; 3] = ["morning", "afternoon", "evening"];

pub fn generate_courses(count: usize, max_students: i32) -> Vec<CourseSeed> {
    (0..count)
        .map(|idx| {
            let subject = SUBJECTS[idx % SUBJECTS.len()];
            let summary: String = Sentence(4..9).fake();
            CourseSeed {
                name: format!("{} {}", subject, idx / SUBJECTS.len() + 1),
                description: format!("{} {}", SEED_COURSE_MARKER, summary),
                max_students,
            }
        })
        .collect()
}

/// Teacher for the `slot`-th class of the `course_idx`-th course. Distinct
/// slots of one course map to distinct teachers while `slot < teachers`.
pub fn teacher_for(course_idx: usize, slot: usize, teachers: usize) -> usize {
    (course_idx + slot) % teachers
}

pub async fn seed_courses(db: &PgPool, count: usize, max_students: i32) -> Result<Vec<i64>> {
    let start = Instant::now();
    println!("📚 Seeding {} courses...", count);

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(count);
    for course in generate_courses(count, max_students) {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO courses (name, description, max_students)
             VALUES ($1, $2, $3)
             ON CONFLICT (name) DO NOTHING
             RETURNING id",
        )
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.max_students)
        .fetch_optional(&mut *tx)
        .await?;
        ids.extend(id);
    }
    tx.commit().await?;

    println!("   ✓ Inserted {} courses in {:?}", ids.len(), start.elapsed());
    Ok(ids)
}

pub async fn seed_classes(
    db: &PgPool,
    course_ids: &[i64],
    teacher_ids: &[i64],
    classes_per_course: usize,
    max_students: i32,
) -> Result<Vec<i64>> {
    if teacher_ids.is_empty() {
        println!("   ⚠️  No teachers seeded, skipping classes");
        return Ok(Vec::new());
    }

    let start = Instant::now();
    let per_course = classes_per_course.min(teacher_ids.len());
    println!("🏫 Seeding {} classes...", course_ids.len() * per_course);

    let starts_on = Utc::now().date_naive();
    let ends_on = starts_on + Duration::days(120);

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(course_ids.len() * per_course);
    for (course_idx, course_id) in course_ids.iter().enumerate() {
        for slot in 0..per_course {
            let teacher_id = teacher_ids[teacher_for(course_idx, slot, teacher_ids.len())];
            let id = sqlx::query_scalar::<_, i64>(
                r#"INSERT INTO classes (id_course, id_teacher, starts_on, ends_on, period, name, max_students)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)
                   RETURNING id"#,
            )
            .bind(course_id)
            .bind(teacher_id)
            .bind(starts_on)
            .bind(ends_on)
            .bind(PERIODS[slot % PERIODS.len()])
            .bind(format!("Class {}-{}", course_idx + 1, (b'A' + (slot % 26) as u8) as char))
            .bind(max_students)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }
    }
    tx.commit().await?;

    println!("   ✓ Inserted {} classes in {:?}", ids.len(), start.elapsed());
    Ok(ids)
}

/// Fills each class with consecutive students, wrapping around the list.
pub async fn seed_enrolments(
    db: &PgPool,
    class_ids: &[i64],
    student_ids: &[i64],
    students_per_class: usize,
) -> Result<usize> {
    if student_ids.is_empty() {
        return Ok(0);
    }

    let start = Instant::now();
    let per_class = students_per_class.min(student_ids.len());

    let mut tx = db.begin().await?;
    let mut total = 0;
    for (class_idx, class_id) in class_ids.iter().enumerate() {
        let offset = class_idx * per_class;
        for n in 0..per_class {
            let student_id = student_ids[(offset + n) % student_ids.len()];
            sqlx::query(
                "INSERT INTO enrolment (id_student, id_class, active, status) VALUES ($1, $2, TRUE, 'ongoing')",
            )
            .bind(student_id)
            .bind(class_id)
            .execute(&mut *tx)
            .await?;
            total += 1;
        }
    }
    tx.commit().await?;

    println!("📝 Inserted {} enrolments in {:?}", total, start.elapsed());
    Ok(total)
}

/// Deletes seeded courses; classes, enrolments and coursework cascade.
pub async fn clear_courses(db: &PgPool) -> Result<u64> {
    let deleted = sqlx::query("DELETE FROM courses WHERE description LIKE $1")
        .bind(format!("{}%", SEED_COURSE_MARKER))
        .execute(db)
        .await?
        .rows_affected();

    Ok(deleted)
}
