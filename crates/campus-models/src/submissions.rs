use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub id: i64,
    pub id_student: i64,
    pub id_activity: i64,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionDto {
    pub id_class: i64,
    pub id_student: i64,
    pub id_activity: i64,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionView {
    pub id: i64,
    pub id_student: i64,
    pub student_name: String,
    pub id_activity: i64,
    pub activity_title: String,
    pub id_class: i64,
    pub class_name: String,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
}
