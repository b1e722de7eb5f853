use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::HistoryEntry;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::service::HistoryService;

#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Grade history of the caller", body = Vec<HistoryEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - student only")
    ),
    tag = "History",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id()))]
pub async fn get_my_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    Ok(Json(HistoryService::get_history(&state.db, auth_user.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/history/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Grade history of the student", body = Vec<HistoryEntry>),
        (status = 404, description = "Student not found")
    ),
    tag = "History",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    Ok(Json(HistoryService::get_student_history(&state.db, id).await?))
}
