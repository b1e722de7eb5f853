use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Material {
    pub id: i64,
    pub id_class: i64,
    pub title: String,
    pub description: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialDto {
    pub id_class: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaterialView {
    pub id: i64,
    pub id_class: i64,
    pub class_name: String,
    pub course_name: String,
    pub title: String,
    pub description: String,
    pub posted_at: DateTime<Utc>,
}
