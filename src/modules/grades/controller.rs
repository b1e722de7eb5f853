use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::grades::{CreateGradeDto, GradeQuery, GradeView, UpdateGradeDto};
use campus_models::{CreatedResponse, MessageResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::GradeService;

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 200, description = "Grade recorded and submission removed", body = CreatedResponse),
        (status = 400, description = "Missing submission or activity, or grade out of bounds"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Grade already exists")
    ),
    tag = "Grades",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_grade(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<Json<CreatedResponse>, AppError> {
    let grade = GradeService::create_grade(&state.db, dto).await?;
    Ok(Json(CreatedResponse::new("Grade created successfully", grade.id)))
}

#[utoipa::path(
    get,
    path = "/api/grades",
    responses(
        (status = 200, description = "All grades", body = Vec<GradeView>)
    ),
    tag = "Grades",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_grades(State(state): State<AppState>) -> Result<Json<Vec<GradeView>>, AppError> {
    Ok(Json(GradeService::get_grades(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    params(
        ("id" = i64, Path, description = "Student ID"),
        GradeQuery
    ),
    responses(
        (status = 200, description = "Grades of the student", body = Vec<GradeView>),
        (status = 404, description = "Grade not found")
    ),
    tag = "Grades",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_grades(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<GradeQuery>,
) -> Result<Json<Vec<GradeView>>, AppError> {
    let grades = GradeService::get_student_grades(&state.db, id, query.id_activity).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = MessageResponse),
        (status = 400, description = "Unknown activity or student, or grade out of bounds"),
        (status = 404, description = "Grade not found")
    ),
    tag = "Grades",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<MessageResponse>, AppError> {
    GradeService::update_grade(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Grade updated successfully")))
}
