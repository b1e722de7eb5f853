use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::MessageResponse;
use campus_models::users::{
    CreateUserDto, UpdateUserDto, UserCreatedResponse, UserDetail, UserListItem,
};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Invalid input or profiles"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Users",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<Json<UserCreatedResponse>, AppError> {
    let created = UserService::create_user(&state.db, dto, state.password_config.cost).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users with roles and enrolled classes", body = Vec<UserListItem>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Users",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserListItem>>, AppError> {
    Ok(Json(UserService::get_users(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with roles, classes, grades and history", body = UserDetail),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDetail>, AppError> {
    Ok(Json(UserService::get_user(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid input or profiles"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Users",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::update_user(&state.db, id, dto, state.password_config.cost).await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "User is still referenced by other records")
    ),
    tag = "Users",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
