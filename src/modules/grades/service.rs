use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;
use campus_db::{TableAccessor, tables};
use campus_models::activities::Activity;
use campus_models::grades::{CreateGradeDto, Grade, GradeView, UpdateGradeDto};
use campus_models::submissions::Submission;
use campus_models::users::User;

const GRADES: TableAccessor<Grade> = TableAccessor::new(&tables::GRADES);
const ACTIVITIES: TableAccessor<Activity> = TableAccessor::new(&tables::ACTIVITIES);
const SUBMISSIONS: TableAccessor<Submission> = TableAccessor::new(&tables::SUBMISSIONS);
const USERS: TableAccessor<User> = TableAccessor::new(&tables::USERS);

const GRADE_VIEW_SELECT: &str = r#"
    SELECT g.id, g.id_student, u.name AS student_name,
           g.id_activity, a.title AS activity_title, g.grade
    FROM grades g
    JOIN users u ON u.id = g.id_student
    JOIN activities a ON a.id = g.id_activity"#;

pub fn is_grade_in_bounds(grade: f64, max_grade: f64) -> bool {
    grade.is_finite() && (0.0..=max_grade).contains(&grade)
}

pub struct GradeService;

impl GradeService {
    /// Records a grade for a submitted activity and removes the submission,
    /// both in one transaction.
    #[instrument(skip(db), fields(db.table = "grades", db.operation = "insert"))]
    pub async fn create_grade(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        let mut tx = db.begin().await?;

        let submission = SUBMISSIONS
            .find_one(
                &mut *tx,
                &[
                    ("id_student", dto.id_student.into()),
                    ("id_activity", dto.id_activity.into()),
                ],
            )
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Submission not found")))?;

        let activity = ACTIVITIES
            .find_one(&mut *tx, &[("id", dto.id_activity.into())])
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Activity not found")))?;

        if !is_grade_in_bounds(dto.grade, activity.max_grade) {
            return Err(AppError::bad_request(anyhow!("Grade not valid")));
        }

        let already_graded = GRADES
            .exists(
                &mut *tx,
                &[
                    ("id_student", dto.id_student.into()),
                    ("id_activity", dto.id_activity.into()),
                ],
            )
            .await?;
        if already_graded {
            return Err(AppError::conflict(anyhow!("Grade already exists")));
        }

        let grade = GRADES
            .create(
                &mut *tx,
                &[
                    ("id_student", dto.id_student.into()),
                    ("id_activity", dto.id_activity.into()),
                    ("grade", dto.grade.into()),
                ],
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    return AppError::conflict(anyhow!("Grade already exists"));
                }
                AppError::from(e)
            })?;

        SUBMISSIONS.delete(&mut *tx, submission.id, "id").await?;
        tx.commit().await?;

        info!(
            grade_id = grade.id,
            student_id = grade.id_student,
            activity_id = grade.id_activity,
            "Grade recorded"
        );
        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn get_grades(db: &PgPool) -> Result<Vec<GradeView>, AppError> {
        let sql = format!("{GRADE_VIEW_SELECT} ORDER BY a.id, u.name");
        let grades = sqlx::query_as::<_, GradeView>(&sql).fetch_all(db).await?;
        Ok(grades)
    }

    /// Grades of one student, optionally narrowed to one activity. Asking for
    /// a specific activity that has no grade is a 404.
    #[instrument(skip(db))]
    pub async fn get_student_grades(
        db: &PgPool,
        student_id: i64,
        activity_id: Option<i64>,
    ) -> Result<Vec<GradeView>, AppError> {
        let sql = format!(
            "{GRADE_VIEW_SELECT} WHERE g.id_student = $1 AND ($2::BIGINT IS NULL OR g.id_activity = $2) ORDER BY a.id"
        );
        let grades = sqlx::query_as::<_, GradeView>(&sql)
            .bind(student_id)
            .bind(activity_id)
            .fetch_all(db)
            .await?;

        if activity_id.is_some() && grades.is_empty() {
            return Err(AppError::not_found(anyhow!("Grade not found")));
        }
        Ok(grades)
    }

    #[instrument(skip(db))]
    pub async fn update_grade(
        db: &PgPool,
        student_id: i64,
        dto: UpdateGradeDto,
    ) -> Result<(), AppError> {
        let activity = ACTIVITIES
            .find_one(db, &[("id", dto.id_activity.into())])
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Activity not found")))?;

        if !is_grade_in_bounds(dto.grade, activity.max_grade) {
            return Err(AppError::bad_request(anyhow!("Grade not valid")));
        }

        if !USERS.exists(db, &[("id", student_id.into())]).await? {
            return Err(AppError::bad_request(anyhow!("Student not found")));
        }

        let result =
            sqlx::query("UPDATE grades SET grade = $1 WHERE id_student = $2 AND id_activity = $3")
                .bind(dto.grade)
                .bind(student_id)
                .bind(dto.id_activity)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Grade not found")));
        }
        Ok(())
    }
}
