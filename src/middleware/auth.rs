use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use campus_auth::{Claims, Role, has_any_role, verify_session_token};
use campus_core::AppError;

use crate::state::AppState;

/// Identity of the caller, attached by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn roles(&self) -> &[Role] {
        &self.0.roles
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        has_any_role(&self.0.roles, allowed)
    }
}

/// Authentication gate. A missing cookie is a 401, a cookie that fails
/// verification is a 403.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(cookie) = jar.get(&state.jwt_config.cookie_name) else {
        warn!(path = %req.uri().path(), "Request without session token");
        return Err(AppError::unauthorized(anyhow!("Missing session token")));
    };

    let claims = verify_session_token(cookie.value(), &state.jwt_config).inspect_err(|_| {
        warn!(path = %req.uri().path(), "Rejected session token");
    })?;

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Not authenticated")))
    }
}
