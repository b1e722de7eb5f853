use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::PersonSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub max_students: i32,
}

/// Body for both creating and replacing a course.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CourseDto {
    #[validate(length(min = 1, max = 150, message = "Name must be between 1 and 150 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "max_students must be positive"))]
    pub max_students: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseClass {
    pub id: i64,
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub period: String,
    pub max_students: i32,
    pub archived: bool,
    pub teacher: PersonSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseWithClasses {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub max_students: i32,
    pub classes: Vec<CourseClass>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassAverage {
    pub class_id: i64,
    pub class_name: String,
    /// Rounded to two decimals; absent when the class has no grades yet.
    pub average_grade: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseAverages {
    pub course_id: i64,
    pub course_name: String,
    pub classes: Vec<ClassAverage>,
}
