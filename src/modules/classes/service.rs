use std::collections::HashMap;

use anyhow::anyhow;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use campus_auth::Role;
use campus_core::AppError;
use campus_db::{AccessorError, FieldValue, TableAccessor, tables};
use campus_models::classes::{Class, ClassDetail, ClassDto, ClassStudent, TopClass};
use campus_models::courses::Course;
use campus_models::{NamedRef, PersonSummary, Standing};

const CLASSES: TableAccessor<Class> = TableAccessor::new(&tables::CLASSES);
const COURSES: TableAccessor<Course> = TableAccessor::new(&tables::COURSES);

#[derive(FromRow)]
struct ClassHeaderRow {
    id: i64,
    name: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    period: String,
    max_students: i32,
    archived: bool,
    course_id: i64,
    course_name: String,
    teacher_id: i64,
    teacher_name: String,
    teacher_email: String,
}

#[derive(FromRow)]
struct ClassStudentRow {
    id_class: i64,
    id: i64,
    name: String,
    email: String,
    average_grade: Option<f64>,
    raw_average: Option<f64>,
}

impl From<ClassStudentRow> for ClassStudent {
    fn from(row: ClassStudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            status: Standing::from_average(row.raw_average),
            average_grade: row.average_grade,
        }
    }
}

fn class_fields(dto: ClassDto) -> Vec<(&'static str, FieldValue)> {
    vec![
        ("id_course", dto.id_course.into()),
        ("id_teacher", dto.id_teacher.into()),
        ("starts_on", dto.starts_on.into()),
        ("ends_on", dto.ends_on.into()),
        ("period", dto.period.into()),
        ("name", dto.name.into()),
        ("max_students", dto.max_students.into()),
        ("archived", dto.archived.into()),
    ]
}

fn map_write_error(e: AccessorError) -> AppError {
    if e.is_unique_violation() {
        return AppError::conflict(anyhow!(
            "A class for this course and teacher already exists"
        ));
    }
    AppError::from(e)
}

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn create_class(db: &PgPool, dto: ClassDto) -> Result<Class, AppError> {
        Self::check_references(db, &dto).await?;

        CLASSES
            .create(db, &class_fields(dto))
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool) -> Result<Vec<ClassDetail>, AppError> {
        let headers = Self::header_rows(db, None).await?;

        let mut students: HashMap<i64, Vec<ClassStudent>> = HashMap::new();
        for row in Self::student_rows(db, None).await? {
            students.entry(row.id_class).or_default().push(row.into());
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let roster = students.remove(&header.id).unwrap_or_default();
                Self::detail(header, roster)
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: i64) -> Result<ClassDetail, AppError> {
        let header = Self::header_rows(db, Some(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))?;

        let roster = Self::student_rows(db, Some(id))
            .await?
            .into_iter()
            .map(ClassStudent::from)
            .collect();

        Ok(Self::detail(header, roster))
    }

    #[instrument(skip(db))]
    pub async fn update_class(db: &PgPool, id: i64, dto: ClassDto) -> Result<(), AppError> {
        if !CLASSES.exists(db, &[("id", id.into())]).await? {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }
        Self::check_references(db, &dto).await?;

        CLASSES
            .update(db, id, &class_fields(dto), "id")
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: i64) -> Result<(), AppError> {
        if CLASSES.delete(db, id, "id").await? == 0 {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }
        Ok(())
    }

    /// Classes ordered by number of active enrolments.
    #[instrument(skip(db))]
    pub async fn get_top_classes(db: &PgPool, limit: i64) -> Result<Vec<TopClass>, AppError> {
        let classes = sqlx::query_as::<_, TopClass>(
            r#"SELECT c.id AS class_id, c.name AS class_name, co.name AS course_name,
                      COUNT(e.id) AS student_count
               FROM classes c
               JOIN courses co ON co.id = c.id_course
               LEFT JOIN enrolment e ON e.id_class = c.id AND e.active = TRUE
               GROUP BY c.id, c.name, co.name
               ORDER BY student_count DESC, c.id
               LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    /// Course must exist and the teacher must hold the teacher role.
    async fn check_references(db: &PgPool, dto: &ClassDto) -> Result<(), AppError> {
        if !COURSES.exists(db, &[("id", dto.id_course.into())]).await? {
            return Err(AppError::bad_request(anyhow!("Course not found")));
        }

        let is_teacher = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM associated WHERE id_user = $1 AND id_profile = $2)",
        )
        .bind(dto.id_teacher)
        .bind(Role::Teacher.id())
        .fetch_one(db)
        .await?;

        if !is_teacher {
            return Err(AppError::bad_request(anyhow!("Teacher not found")));
        }
        Ok(())
    }

    async fn header_rows(
        db: &PgPool,
        class_id: Option<i64>,
    ) -> Result<Vec<ClassHeaderRow>, AppError> {
        let rows = sqlx::query_as::<_, ClassHeaderRow>(
            r#"SELECT c.id, c.name, c.starts_on, c.ends_on, c.period, c.max_students, c.archived,
                      co.id AS course_id, co.name AS course_name,
                      u.id AS teacher_id, u.name AS teacher_name, u.email AS teacher_email
               FROM classes c
               JOIN courses co ON co.id = c.id_course
               JOIN users u ON u.id = c.id_teacher
               WHERE ($1::BIGINT IS NULL OR c.id = $1)
               ORDER BY c.id"#,
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(rows)
    }

    async fn student_rows(
        db: &PgPool,
        class_id: Option<i64>,
    ) -> Result<Vec<ClassStudentRow>, AppError> {
        let rows = sqlx::query_as::<_, ClassStudentRow>(
            r#"SELECT e.id_class, u.id, u.name, u.email,
                      (SELECT ROUND(AVG(g.grade)::numeric, 2)::float8
                       FROM grades g
                       JOIN activities a ON a.id = g.id_activity
                       WHERE g.id_student = u.id AND a.id_class = e.id_class) AS average_grade,
                      (SELECT AVG(g.grade)::float8
                       FROM grades g
                       JOIN activities a ON a.id = g.id_activity
                       WHERE g.id_student = u.id AND a.id_class = e.id_class) AS raw_average
               FROM enrolment e
               JOIN users u ON u.id = e.id_student
               WHERE e.active = TRUE AND ($1::BIGINT IS NULL OR e.id_class = $1)
               ORDER BY u.name"#,
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(rows)
    }

    fn detail(header: ClassHeaderRow, students: Vec<ClassStudent>) -> ClassDetail {
        ClassDetail {
            id: header.id,
            name: header.name,
            starts_on: header.starts_on,
            ends_on: header.ends_on,
            period: header.period,
            max_students: header.max_students,
            archived: header.archived,
            course: NamedRef {
                id: header.course_id,
                name: header.course_name,
            },
            teacher: PersonSummary {
                id: header.teacher_id,
                name: header.teacher_name,
                email: header.teacher_email,
            },
            student_count: students.len(),
            students,
        }
    }
}
