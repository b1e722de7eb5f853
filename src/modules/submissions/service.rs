use anyhow::anyhow;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;
use campus_db::{FieldValue, TableAccessor, tables};
use campus_models::activities::Activity;
use campus_models::classes::Class;
use campus_models::grades::Grade;
use campus_models::submissions::{CreateSubmissionDto, Submission, SubmissionView};

const SUBMISSIONS: TableAccessor<Submission> = TableAccessor::new(&tables::SUBMISSIONS);
const CLASSES: TableAccessor<Class> = TableAccessor::new(&tables::CLASSES);
const ACTIVITIES: TableAccessor<Activity> = TableAccessor::new(&tables::ACTIVITIES);
const GRADES: TableAccessor<Grade> = TableAccessor::new(&tables::GRADES);

pub struct SubmissionService;

impl SubmissionService {
    #[instrument(skip(db))]
    pub async fn create_submission(
        db: &PgPool,
        dto: CreateSubmissionDto,
    ) -> Result<Submission, AppError> {
        if !CLASSES.exists(db, &[("id", dto.id_class.into())]).await? {
            return Err(AppError::bad_request(anyhow!("Class not found")));
        }

        let enrolled = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM enrolment
                   WHERE id_student = $1 AND id_class = $2 AND active = TRUE
               )"#,
        )
        .bind(dto.id_student)
        .bind(dto.id_class)
        .fetch_one(db)
        .await?;
        if !enrolled {
            return Err(AppError::bad_request(anyhow!(
                "Student not enrolled in this class"
            )));
        }

        let pair: [(&str, FieldValue); 2] = [
            ("id_student", dto.id_student.into()),
            ("id_activity", dto.id_activity.into()),
        ];

        if SUBMISSIONS.exists(db, &pair).await? {
            return Err(AppError::conflict(anyhow!("Submission already exists")));
        }

        let activity = ACTIVITIES
            .find_one(
                db,
                &[
                    ("id", dto.id_activity.into()),
                    ("id_class", dto.id_class.into()),
                ],
            )
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Activity not found in this class")))?;

        if activity.due_date < Utc::now().date_naive() {
            return Err(AppError::bad_request(anyhow!("Due date has passed")));
        }

        if GRADES.exists(db, &pair).await? {
            return Err(AppError::bad_request(anyhow!("Grade already published")));
        }

        SUBMISSIONS
            .create(
                db,
                &[
                    ("id_student", dto.id_student.into()),
                    ("id_activity", dto.id_activity.into()),
                    ("content", dto.content.into()),
                ],
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    return AppError::conflict(anyhow!("Submission already exists"));
                }
                AppError::from(e)
            })
    }

    /// Submissions for every class taught by `teacher_id`.
    #[instrument(skip(db))]
    pub async fn get_teacher_submissions(
        db: &PgPool,
        teacher_id: i64,
    ) -> Result<Vec<SubmissionView>, AppError> {
        let submissions = sqlx::query_as::<_, SubmissionView>(
            r#"SELECT s.id, s.id_student, u.name AS student_name,
                      s.id_activity, a.title AS activity_title,
                      c.id AS id_class, c.name AS class_name,
                      s.content, s.submitted_at
               FROM submissions s
               JOIN users u ON u.id = s.id_student
               JOIN activities a ON a.id = s.id_activity
               JOIN classes c ON c.id = a.id_class
               WHERE c.id_teacher = $1
               ORDER BY s.submitted_at DESC"#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(submissions)
    }
}
