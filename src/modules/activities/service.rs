use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;
use campus_db::{AccessorError, FieldValue, TableAccessor, tables};
use campus_models::activities::{Activity, ActivityDto};
use campus_models::classes::Class;

const ACTIVITIES: TableAccessor<Activity> = TableAccessor::new(&tables::ACTIVITIES);
const CLASSES: TableAccessor<Class> = TableAccessor::new(&tables::CLASSES);

fn activity_fields(dto: ActivityDto) -> Vec<(&'static str, FieldValue)> {
    vec![
        ("id_class", dto.id_class.into()),
        ("title", dto.title.into()),
        ("description", dto.description.into()),
        ("type", dto.kind.into()),
        ("max_grade", dto.max_grade.into()),
        ("due_date", dto.due_date.into()),
    ]
}

fn map_write_error(e: AccessorError) -> AppError {
    if e.is_unique_violation() {
        return AppError::conflict(anyhow!("Activity already exists"));
    }
    AppError::from(e)
}

/// Due dates may be today but not earlier.
pub fn is_valid_due_date(due_date: NaiveDate, today: NaiveDate) -> bool {
    due_date >= today
}

pub struct ActivityService;

impl ActivityService {
    #[instrument(skip(db))]
    pub async fn create_activity(db: &PgPool, dto: ActivityDto) -> Result<Activity, AppError> {
        Self::check_rules(db, &dto).await?;

        ACTIVITIES
            .create(db, &activity_fields(dto))
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(db))]
    pub async fn get_activities(db: &PgPool) -> Result<Vec<Activity>, AppError> {
        let activities =
            sqlx::query_as::<_, Activity>("SELECT * FROM activities ORDER BY due_date, id")
                .fetch_all(db)
                .await?;
        Ok(activities)
    }

    #[instrument(skip(db))]
    pub async fn get_activity(db: &PgPool, id: i64) -> Result<Activity, AppError> {
        ACTIVITIES
            .find_one(db, &[("id", id.into())])
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Activity not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_activity(db: &PgPool, id: i64, dto: ActivityDto) -> Result<(), AppError> {
        if !ACTIVITIES.exists(db, &[("id", id.into())]).await? {
            return Err(AppError::not_found(anyhow!("Activity not found")));
        }
        Self::check_rules(db, &dto).await?;

        ACTIVITIES
            .update(db, id, &activity_fields(dto), "id")
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    async fn check_rules(db: &PgPool, dto: &ActivityDto) -> Result<(), AppError> {
        if !CLASSES.exists(db, &[("id", dto.id_class.into())]).await? {
            return Err(AppError::bad_request(anyhow!("Class not found")));
        }
        if !is_valid_due_date(dto.due_date, Utc::now().date_naive()) {
            return Err(AppError::bad_request(anyhow!("Date not valid")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_date_today_is_accepted() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        assert!(is_valid_due_date(today, today));
        assert!(is_valid_due_date(today.succ_opt().unwrap(), today));
        assert!(!is_valid_due_date(today.pred_opt().unwrap(), today));
    }
}
