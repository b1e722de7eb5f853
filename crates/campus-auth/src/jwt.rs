//! Session token codec.
//!
//! A session token is an HS256 JWT over [`Claims`]. Tokens are never stored
//! server-side; logging out only drops the cookie that carries them.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use campus_config::JwtConfig;
use campus_core::AppError;

use crate::claims::Claims;
use crate::roles::Role;

/// Signs a session token for the given identity, expiring after
/// `jwt_config.expires_in` seconds.
pub fn sign_session_token(
    user_id: i64,
    email: &str,
    roles: Vec<Role>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.expires_in.max(0) as usize;

    let claims = Claims {
        id: user_id,
        email: email.to_string(),
        roles,
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create session token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns a 403 error when the token is malformed, signed with another
/// secret or expired.
pub fn verify_session_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::forbidden(anyhow!("Invalid or expired session token")))
}
