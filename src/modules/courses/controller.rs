use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::courses::{CourseAverages, CourseDto, CourseWithClasses};
use campus_models::{CreatedResponse, MessageResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CourseService;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseDto,
    responses(
        (status = 200, description = "Course created", body = CreatedResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Course already exists")
    ),
    tag = "Courses",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<Json<CreatedResponse>, AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok(Json(CreatedResponse::new("Course created successfully", course.id)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses with their classes", body = Vec<CourseWithClasses>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Courses",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithClasses>>, AppError> {
    Ok(Json(CourseService::get_courses(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseWithClasses),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseWithClasses>, AppError> {
    Ok(Json(CourseService::get_course(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = CourseDto,
    responses(
        (status = 200, description = "Course updated", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course already exists")
    ),
    tag = "Courses",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Course updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/courses/averages/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Average grade per class", body = CourseAverages),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_averages(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseAverages>, AppError> {
    Ok(Json(CourseService::get_course_averages(&state.db, id).await?))
}
