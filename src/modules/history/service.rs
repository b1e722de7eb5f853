use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;
use campus_db::{TableAccessor, tables};
use campus_models::HistoryEntry;
use campus_models::history::HistoryRow;
use campus_models::users::User;

const USERS: TableAccessor<User> = TableAccessor::new(&tables::USERS);

pub struct HistoryService;

impl HistoryService {
    /// Final average per class the student is or was enrolled in and has
    /// grades for, rounded to two decimals.
    #[instrument(skip(db))]
    pub async fn get_history(db: &PgPool, student_id: i64) -> Result<Vec<HistoryEntry>, AppError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"SELECT co.id AS course_id, co.name AS course_name,
                      c.id AS class_id, c.name AS class_name,
                      ROUND(AVG(g.grade)::numeric, 2)::float8 AS final_average,
                      AVG(g.grade)::float8 AS raw_average
               FROM grades g
               JOIN activities a ON a.id = g.id_activity
               JOIN classes c ON c.id = a.id_class
               JOIN courses co ON co.id = c.id_course
               WHERE g.id_student = $1
                 AND EXISTS (
                     SELECT 1 FROM enrolment e
                     WHERE e.id_student = g.id_student AND e.id_class = c.id
                 )
               GROUP BY co.id, co.name, c.id, c.name
               ORDER BY co.name, c.name"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_student_history(
        db: &PgPool,
        student_id: i64,
    ) -> Result<Vec<HistoryEntry>, AppError> {
        if !USERS.exists(db, &[("id", student_id.into())]).await? {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }
        Self::get_history(db, student_id).await
    }
}
