use axum::{Json, extract::State};
use tracing::instrument;

use campus_core::AppError;
use campus_models::MessageResponse;
use campus_models::me::{Profile, UpdateMeDto};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::MeService;

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Profile of the caller", body = Profile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Me",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(MeService::get_profile(&state.db, auth_user.id()).await?))
}

#[utoipa::path(
    put,
    path = "/api/me",
    request_body = UpdateMeDto,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Fields not valid"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Me",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = auth_user.id()))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateMeDto>,
) -> Result<Json<MessageResponse>, AppError> {
    MeService::update_profile(&state.db, auth_user.id(), dto, state.password_config.cost).await?;
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
