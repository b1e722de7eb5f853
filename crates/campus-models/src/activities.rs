use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub id: i64,
    pub id_class: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub max_grade: f64,
    pub due_date: NaiveDate,
}

/// Body for both creating and replacing an activity.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActivityDto {
    pub id_class: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    #[validate(range(exclusive_min = 0.0, message = "max_grade must be positive"))]
    pub max_grade: f64,
    pub due_date: NaiveDate,
}
