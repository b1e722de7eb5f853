use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: i64,
    pub id_student: i64,
    pub id_activity: i64,
    pub grade: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    pub id_student: i64,
    pub id_activity: i64,
    pub grade: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    pub id_activity: i64,
    pub grade: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GradeQuery {
    pub id_activity: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GradeView {
    pub id: i64,
    pub id_student: i64,
    pub student_name: String,
    pub id_activity: i64,
    pub activity_title: String,
    pub grade: f64,
}
