use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::classes::{ClassDetail, ClassDto, TopClass, TopClassesQuery};
use campus_models::{CreatedResponse, MessageResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ClassService;

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = ClassDto,
    responses(
        (status = 200, description = "Class created", body = CreatedResponse),
        (status = 400, description = "Invalid input, unknown course or teacher"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "A class for this course and teacher already exists")
    ),
    tag = "Classes",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ClassDto>,
) -> Result<Json<CreatedResponse>, AppError> {
    let class = ClassService::create_class(&state.db, dto).await?;
    Ok(Json(CreatedResponse::new("Class created successfully", class.id)))
}

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Classes with course, teacher and active students", body = Vec<ClassDetail>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Classes",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassDetail>>, AppError> {
    Ok(Json(ClassService::get_classes(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/classes/top",
    params(TopClassesQuery),
    responses(
        (status = 200, description = "Classes with the most active enrolments", body = Vec<TopClass>)
    ),
    tag = "Classes",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_top_classes(
    State(state): State<AppState>,
    Query(query): Query<TopClassesQuery>,
) -> Result<Json<Vec<TopClass>>, AppError> {
    Ok(Json(ClassService::get_top_classes(&state.db, query.limit()).await?))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = i64, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = ClassDetail),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClassDetail>, AppError> {
    Ok(Json(ClassService::get_class(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = i64, Path, description = "Class ID")),
    request_body = ClassDto,
    responses(
        (status = 200, description = "Class updated", body = MessageResponse),
        (status = 400, description = "Invalid input, unknown course or teacher"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "A class for this course and teacher already exists")
    ),
    tag = "Classes",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<ClassDto>,
) -> Result<Json<MessageResponse>, AppError> {
    ClassService::update_class(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Class updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = i64, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted", body = MessageResponse),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ClassService::delete_class(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Class deleted successfully")))
}
