use std::collections::HashMap;

use anyhow::anyhow;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use campus_core::AppError;
use campus_db::{AccessorError, TableAccessor, tables};
use campus_models::PersonSummary;
use campus_models::courses::{
    ClassAverage, Course, CourseAverages, CourseClass, CourseDto, CourseWithClasses,
};

const COURSES: TableAccessor<Course> = TableAccessor::new(&tables::COURSES);

#[derive(FromRow)]
struct CourseClassRow {
    id: i64,
    id_course: i64,
    name: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    period: String,
    max_students: i32,
    archived: bool,
    teacher_id: i64,
    teacher_name: String,
    teacher_email: String,
}

impl From<CourseClassRow> for CourseClass {
    fn from(row: CourseClassRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            starts_on: row.starts_on,
            ends_on: row.ends_on,
            period: row.period,
            max_students: row.max_students,
            archived: row.archived,
            teacher: PersonSummary {
                id: row.teacher_id,
                name: row.teacher_name,
                email: row.teacher_email,
            },
        }
    }
}

fn map_write_error(e: AccessorError) -> AppError {
    if e.is_unique_violation() {
        return AppError::conflict(anyhow!("Course already exists"));
    }
    AppError::from(e)
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(db: &PgPool, dto: CourseDto) -> Result<Course, AppError> {
        COURSES
            .create(
                db,
                &[
                    ("name", dto.name.into()),
                    ("description", dto.description.into()),
                    ("max_students", dto.max_students.into()),
                ],
            )
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(db))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<CourseWithClasses>, AppError> {
        let courses = sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY name")
            .fetch_all(db)
            .await?;

        let mut classes: HashMap<i64, Vec<CourseClass>> = HashMap::new();
        for row in Self::class_rows(db, None).await? {
            classes.entry(row.id_course).or_default().push(row.into());
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let classes = classes.remove(&course.id).unwrap_or_default();
                Self::with_classes(course, classes)
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: i64) -> Result<CourseWithClasses, AppError> {
        let course = Self::find_course(db, id).await?;
        let classes = Self::class_rows(db, Some(id))
            .await?
            .into_iter()
            .map(CourseClass::from)
            .collect();

        Ok(Self::with_classes(course, classes))
    }

    #[instrument(skip(db))]
    pub async fn update_course(db: &PgPool, id: i64, dto: CourseDto) -> Result<(), AppError> {
        let updated = COURSES
            .update(
                db,
                id,
                &[
                    ("name", dto.name.into()),
                    ("description", dto.description.into()),
                    ("max_students", dto.max_students.into()),
                ],
                "id",
            )
            .await
            .map_err(map_write_error)?;

        if updated == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: i64) -> Result<(), AppError> {
        if COURSES.delete(db, id, "id").await? == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }
        Ok(())
    }

    /// Average grade per class of a course, rounded to two decimals.
    #[instrument(skip(db))]
    pub async fn get_course_averages(db: &PgPool, id: i64) -> Result<CourseAverages, AppError> {
        let course = Self::find_course(db, id).await?;

        let classes = sqlx::query_as::<_, ClassAverage>(
            r#"SELECT c.id AS class_id, c.name AS class_name,
                      ROUND(AVG(g.grade)::numeric, 2)::float8 AS average_grade
               FROM classes c
               LEFT JOIN activities a ON a.id_class = c.id
               LEFT JOIN grades g ON g.id_activity = a.id
               WHERE c.id_course = $1
               GROUP BY c.id, c.name
               ORDER BY c.id"#,
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(CourseAverages {
            course_id: course.id,
            course_name: course.name,
            classes,
        })
    }

    async fn find_course(db: &PgPool, id: i64) -> Result<Course, AppError> {
        COURSES
            .find_one(db, &[("id", id.into())])
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    async fn class_rows(
        db: &PgPool,
        course_id: Option<i64>,
    ) -> Result<Vec<CourseClassRow>, AppError> {
        let rows = sqlx::query_as::<_, CourseClassRow>(
            r#"SELECT c.id, c.id_course, c.name, c.starts_on, c.ends_on, c.period,
                      c.max_students, c.archived,
                      u.id AS teacher_id, u.name AS teacher_name, u.email AS teacher_email
               FROM classes c
               JOIN users u ON u.id = c.id_teacher
               WHERE ($1::BIGINT IS NULL OR c.id_course = $1)
               ORDER BY c.id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(rows)
    }

    fn with_classes(course: Course, classes: Vec<CourseClass>) -> CourseWithClasses {
        CourseWithClasses {
            id: course.id,
            name: course.name,
            description: course.description,
            max_students: course.max_students,
            classes,
        }
    }
}
