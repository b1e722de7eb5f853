use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::{NamedRef, PersonSummary};
use crate::history::Standing;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: i64,
    pub id_course: i64,
    pub id_teacher: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub period: String,
    pub name: String,
    pub max_students: i32,
    pub archived: bool,
}

/// Body for both creating and replacing a class.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_class_dates"))]
pub struct ClassDto {
    pub id_course: i64,
    pub id_teacher: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    #[validate(length(min = 1, message = "Period is required"))]
    pub period: String,
    #[validate(length(min = 1, max = 150, message = "Name must be between 1 and 150 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "max_students must be positive"))]
    pub max_students: i32,
    #[serde(default)]
    pub archived: bool,
}

fn validate_class_dates(dto: &ClassDto) -> Result<(), ValidationError> {
    if dto.ends_on < dto.starts_on {
        let mut err = ValidationError::new("date_order");
        err.message = Some("ends_on must not be before starts_on".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassStudent {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub average_grade: Option<f64>,
    pub status: Standing,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassDetail {
    pub id: i64,
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub period: String,
    pub max_students: i32,
    pub archived: bool,
    pub course: NamedRef,
    pub teacher: PersonSummary,
    pub students: Vec<ClassStudent>,
    pub student_count: usize,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TopClass {
    pub class_id: i64,
    pub class_name: String,
    pub course_name: String,
    pub student_count: i64,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TopClassesQuery {
    /// How many classes to return (default 5, at most 50)
    pub limit: Option<i64>,
}

impl TopClassesQuery {
    pub const DEFAULT_LIMIT: i64 = 5;
    pub const MAX_LIMIT: i64 = 50;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}
