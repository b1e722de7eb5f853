use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrolment {
    pub id: i64,
    pub id_student: i64,
    pub id_class: i64,
    pub enrolled_at: DateTime<Utc>,
    pub active: bool,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnrolmentStatus {
    Ongoing,
    Approved,
    Failed,
}

impl EnrolmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrolmentStatus::Ongoing => "ongoing",
            EnrolmentStatus::Approved => "approved",
            EnrolmentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEnrolmentDto {
    pub id_student: i64,
    pub id_class: i64,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date.
    #[serde(deserialize_with = "crate::serde::deserialize_timestamp_or_date")]
    #[schema(example = "2025-03-01T09:00:00Z")]
    pub enrolled_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrolmentCreated {
    pub message: String,
    /// True when a failed enrolment in the same course was purged first.
    pub priority: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrolmentDto {
    pub id_class: i64,
    pub active: bool,
    pub status: EnrolmentStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EnrolmentClassQuery {
    pub id_class: i64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActiveEnrolment {
    pub id_student: i64,
    pub student_name: String,
    pub id_class: i64,
    pub class_name: String,
    pub enrolled_at: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassEnrolment {
    pub id_student: i64,
    pub student_name: String,
    pub student_email: String,
    pub id_class: i64,
    pub enrolled_at: DateTime<Utc>,
    pub active: bool,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentEnrolment {
    pub id_student: i64,
    pub id_class: i64,
    pub class_name: String,
    pub course_name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub period: String,
    pub enrolled_at: DateTime<Utc>,
    pub active: bool,
    pub status: String,
}
