use anyhow::anyhow;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use campus_auth::Role;
use campus_core::AppError;
use campus_db::{TableAccessor, tables};
use campus_models::classes::Class;
use campus_models::enrolments::{
    ActiveEnrolment, ClassEnrolment, CreateEnrolmentDto, Enrolment, EnrolmentCreated,
    EnrolmentStatus, StudentEnrolment, UpdateEnrolmentDto,
};

use crate::realtime::{CLASS_FULL_EVENT, ClassFullEvent, NotificationHub};

const ENROLMENTS: TableAccessor<Enrolment> = TableAccessor::new(&tables::ENROLMENT);

pub const CAPACITY_MESSAGE: &str = "Max students reached. Teacher notified";

pub struct EnrolmentService;

impl EnrolmentService {
    /// Enrols a student in a class.
    ///
    /// Runs in one transaction holding a row lock on the class, so two
    /// concurrent requests for the same class see each other's inserts when
    /// counting seats. When the class is full the transaction is rolled back
    /// and a [`CLASS_FULL_EVENT`] is sent to the class's teacher.
    ///
    /// A `failed` enrolment of the student anywhere in the same course is
    /// purged before inserting; `priority` in the response reports whether
    /// that happened.
    #[instrument(skip(db, notifications), fields(db.table = "enrolment", db.operation = "insert"))]
    pub async fn create_enrolment(
        db: &PgPool,
        notifications: &NotificationHub,
        dto: CreateEnrolmentDto,
    ) -> Result<EnrolmentCreated, AppError> {
        let mut tx = db.begin().await?;

        let is_student = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM associated WHERE id_user = $1 AND id_profile = $2)",
        )
        .bind(dto.id_student)
        .bind(Role::Student.id())
        .fetch_one(&mut *tx)
        .await?;

        if !is_student {
            return Err(AppError::bad_request(anyhow!("Student not found")));
        }

        let class = sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = $1 FOR UPDATE")
            .bind(dto.id_class)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Class not found")))?;

        if class.id_teacher == dto.id_student {
            return Err(AppError::bad_request(anyhow!("Cannot enrol on own class")));
        }

        let active_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrolment WHERE id_class = $1 AND active = TRUE",
        )
        .bind(class.id)
        .fetch_one(&mut *tx)
        .await?;

        if active_count >= i64::from(class.max_students) {
            tx.rollback().await?;

            let event = ClassFullEvent {
                id_class: class.id,
                teacher_id: class.id_teacher,
                id_student: dto.id_student,
                message: format!(
                    "Class {} is full: student {} could not be enrolled",
                    class.name, dto.id_student
                ),
                timestamp: Utc::now(),
            };
            let listeners = notifications.publish(
                NotificationHub::teacher_room(class.id_teacher),
                CLASS_FULL_EVENT,
                &event,
            );
            warn!(
                class_id = class.id,
                student_id = dto.id_student,
                max_students = class.max_students,
                listeners,
                "Enrolment rejected, class is full"
            );

            return Err(AppError::bad_request(anyhow!(CAPACITY_MESSAGE)));
        }

        let has_live_enrolment = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM enrolment
                   WHERE id_student = $1 AND id_class = $2 AND status <> 'failed'
               )"#,
        )
        .bind(dto.id_student)
        .bind(class.id)
        .fetch_one(&mut *tx)
        .await?;

        if has_live_enrolment {
            return Err(AppError::conflict(anyhow!(
                "Enrolment already exists and not failed"
            )));
        }

        let purged = sqlx::query(
            r#"DELETE FROM enrolment e
               USING classes c
               WHERE e.id_class = c.id
                 AND e.id_student = $1
                 AND e.status = 'failed'
                 AND c.id_course = $2"#,
        )
        .bind(dto.id_student)
        .bind(class.id_course)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        let priority = purged > 0;

        ENROLMENTS
            .create(
                &mut *tx,
                &[
                    ("id_student", dto.id_student.into()),
                    ("id_class", class.id.into()),
                    ("enrolled_at", dto.enrolled_at.into()),
                    ("active", dto.active.into()),
                    ("status", EnrolmentStatus::Ongoing.as_str().into()),
                ],
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    return AppError::conflict(anyhow!("Enrolment already exists and not failed"));
                }
                AppError::from(e)
            })?;

        tx.commit().await?;

        info!(
            class_id = class.id,
            student_id = dto.id_student,
            priority,
            "Enrolment created"
        );

        Ok(EnrolmentCreated {
            message: "Enrolment created successfully".to_string(),
            priority,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_active_enrolments(db: &PgPool) -> Result<Vec<ActiveEnrolment>, AppError> {
        let enrolments = sqlx::query_as::<_, ActiveEnrolment>(
            r#"SELECT e.id_student, u.name AS student_name, e.id_class,
                      c.name AS class_name, e.enrolled_at, e.status
               FROM enrolment e
               JOIN users u ON u.id = e.id_student
               JOIN classes c ON c.id = e.id_class
               WHERE e.active = TRUE
               ORDER BY e.id_class, u.name"#,
        )
        .fetch_all(db)
        .await?;

        Ok(enrolments)
    }

    #[instrument(skip(db))]
    pub async fn get_class_enrolments(
        db: &PgPool,
        class_id: i64,
    ) -> Result<Vec<ClassEnrolment>, AppError> {
        let enrolments = sqlx::query_as::<_, ClassEnrolment>(
            r#"SELECT e.id_student, u.name AS student_name, u.email AS student_email,
                      e.id_class, e.enrolled_at, e.active, e.status
               FROM enrolment e
               JOIN users u ON u.id = e.id_student
               WHERE e.id_class = $1 AND e.active = TRUE
               ORDER BY u.name"#,
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        if enrolments.is_empty() {
            return Err(AppError::not_found(anyhow!(
                "No enrolments found for this class"
            )));
        }

        Ok(enrolments)
    }

    #[instrument(skip(db))]
    pub async fn get_student_enrolments(
        db: &PgPool,
        student_id: i64,
    ) -> Result<Vec<StudentEnrolment>, AppError> {
        let enrolments = sqlx::query_as::<_, StudentEnrolment>(
            r#"SELECT e.id_student, e.id_class, c.name AS class_name, co.name AS course_name,
                      c.starts_on, c.ends_on, c.period, e.enrolled_at, e.active, e.status
               FROM enrolment e
               JOIN classes c ON c.id = e.id_class
               JOIN courses co ON co.id = c.id_course
               WHERE e.id_student = $1
               ORDER BY e.enrolled_at DESC"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        if enrolments.is_empty() {
            return Err(AppError::not_found(anyhow!(
                "No enrolments found for this student"
            )));
        }

        Ok(enrolments)
    }

    /// Sets the active flag and status of a student's enrolment in a class.
    /// The live (non-failed) row wins when failed ones also exist.
    #[instrument(skip(db))]
    pub async fn update_student_enrolment(
        db: &PgPool,
        student_id: i64,
        dto: UpdateEnrolmentDto,
    ) -> Result<Enrolment, AppError> {
        let enrolment = sqlx::query_as::<_, Enrolment>(
            r#"UPDATE enrolment SET active = $3, status = $4
               WHERE id = (
                   SELECT id FROM enrolment
                   WHERE id_student = $1 AND id_class = $2
                   ORDER BY (status <> 'failed') DESC, enrolled_at DESC
                   LIMIT 1
               )
               RETURNING *"#,
        )
        .bind(student_id)
        .bind(dto.id_class)
        .bind(dto.active)
        .bind(dto.status.as_str())
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!("Enrolment already exists and not failed"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow!("Enrolment not found")))?;

        Ok(enrolment)
    }

    #[instrument(skip(db))]
    pub async fn delete_student_enrolment(
        db: &PgPool,
        student_id: i64,
        class_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrolment WHERE id_student = $1 AND id_class = $2")
            .bind(student_id)
            .bind(class_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Enrolment not found")));
        }

        Ok(())
    }
}
