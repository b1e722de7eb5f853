//! Authorization gate.
//!
//! Each wrapper is meant for `axum::middleware::from_fn` on a route group
//! nested under the authentication gate:
//!
//! ```rust,ignore
//! Router::new().nest(
//!     "/courses",
//!     init_courses_router().route_layer(middleware::from_fn(require_admin)),
//! )
//! ```

use anyhow::anyhow;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use campus_auth::Role;
use campus_core::AppError;

use crate::middleware::auth::AuthUser;

/// Admits the request when the caller holds at least one of `allowed`.
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed: &[Role],
) -> Result<Response, AppError> {
    let Some(auth_user) = req.extensions().get::<AuthUser>() else {
        return Err(AppError::unauthorized(anyhow!("Not authenticated")));
    };

    if !auth_user.has_any_role(allowed) {
        warn!(
            user_id = auth_user.id(),
            roles = ?auth_user.roles(),
            required = ?allowed,
            path = %req.uri().path(),
            "Missing permissions"
        );
        return Err(AppError::forbidden(anyhow!("Missing permissions")));
    }

    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, &[Role::Admin]).await
}

pub async fn require_teacher(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, &[Role::Teacher]).await
}

pub async fn require_student(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, &[Role::Student]).await
}

pub async fn require_teacher_or_student(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, &[Role::Teacher, Role::Student]).await
}
