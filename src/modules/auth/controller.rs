use anyhow::anyhow;
use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::{info, instrument};

use campus_config::JwtConfig;
use campus_core::AppError;
use campus_models::MessageResponse;
use campus_models::auth::{LoginRequest, LoginResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

fn session_cookie(config: &JwtConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; the session cookie is set", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Already logged in")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, body))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<ValidatedJson<LoginRequest>, AppError>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    // An existing session wins over a malformed body
    if jar.get(&state.jwt_config.cookie_name).is_some() {
        return Err(AppError::conflict(anyhow!("Already logged in")));
    }
    let ValidatedJson(dto) = body?;

    let response = AuthService::login(&state.db, &state.jwt_config, dto).await?;
    info!(user_id = response.user.id, roles = ?response.roles, "User logged in");

    let cookie = session_cookie(&state.jwt_config, response.token.clone());
    Ok((jar.add(cookie), Json(response)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
        (status = 404, description = "Not logged in")
    ),
    tag = "Authentication",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if jar.get(&state.jwt_config.cookie_name).is_none() {
        return Err(AppError::not_found(anyhow!("Not logged in")));
    }

    let jar = jar.remove(Cookie::build((state.jwt_config.cookie_name.clone(), "")).path("/"));
    Ok((jar, Json(MessageResponse::new("Logged out successfully"))))
}
