use campus_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::history::HistoryEntry;
use crate::users::UserGradeInfo;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MeEnrolment {
    pub class_id: i64,
    pub class_name: String,
    pub course_name: String,
    pub active: bool,
    pub status: String,
}

/// What the signed-in user sees about themselves.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub enrolments: Vec<MeEnrolment>,
    pub grades: Vec<UserGradeInfo>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMeDto {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

impl UpdateMeDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}
