use std::env;

pub const DEFAULT_SESSION_COOKIE: &str = "SESSION_TOKEN";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            expires_in: env::var("JWT_EXPIRES_IN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 24 hours
            cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string()),
            cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}
