use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::history::HistoryEntry;

/// A row of `users`. Kept out of responses because it holds the hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Association {
    pub id_user: i64,
    pub id_profile: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProfileInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrolledClassInfo {
    pub id_class: i64,
    pub class_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub profiles: Vec<ProfileInfo>,
    pub enrolments: Vec<EnrolledClassInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserClassInfo {
    pub id: i64,
    pub name: String,
    pub course_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserGradeInfo {
    pub activity_id: i64,
    pub activity_title: String,
    pub grade: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub profiles: Vec<ProfileInfo>,
    pub classes: Vec<UserClassInfo>,
    pub grades: Vec<UserGradeInfo>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Profile ids: 1 Administrador, 2 Professor, 3 Aluno
    #[validate(length(min = 1, message = "At least one profile is required"))]
    pub profiles: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "At least one profile is required"))]
    pub profiles: Option<Vec<i64>>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.profiles.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserCreatedResponse {
    pub message: String,
    pub id: i64,
    pub profiles: Vec<ProfileInfo>,
}
