use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::activities::{Activity, ActivityDto};
use campus_models::{CreatedResponse, MessageResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ActivityService;

#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = ActivityDto,
    responses(
        (status = 200, description = "Activity created", body = CreatedResponse),
        (status = 400, description = "Invalid input, unknown class or due date in the past"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Activity already exists")
    ),
    tag = "Activities",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_activity(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ActivityDto>,
) -> Result<Json<CreatedResponse>, AppError> {
    let activity = ActivityService::create_activity(&state.db, dto).await?;
    Ok(Json(CreatedResponse::new(
        "Activity created successfully",
        activity.id,
    )))
}

#[utoipa::path(
    get,
    path = "/api/activities",
    responses(
        (status = 200, description = "All activities", body = Vec<Activity>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Activities",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Activity>>, AppError> {
    Ok(Json(ActivityService::get_activities(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    params(("id" = i64, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity", body = Activity),
        (status = 404, description = "Activity not found")
    ),
    tag = "Activities",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Activity>, AppError> {
    Ok(Json(ActivityService::get_activity(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    params(("id" = i64, Path, description = "Activity ID")),
    request_body = ActivityDto,
    responses(
        (status = 200, description = "Activity updated", body = MessageResponse),
        (status = 400, description = "Invalid input, unknown class or due date in the past"),
        (status = 404, description = "Activity not found"),
        (status = 409, description = "Activity already exists")
    ),
    tag = "Activities",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<ActivityDto>,
) -> Result<Json<MessageResponse>, AppError> {
    ActivityService::update_activity(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Activity updated successfully")))
}
