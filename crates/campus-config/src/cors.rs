use std::env;

use crate::split_list;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            &env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string()),
            &env::var("CORS_METHODS").unwrap_or_else(|_| "GET,POST,PUT,DELETE".to_string()),
            &env::var("CORS_HEADERS").unwrap_or_else(|_| "Content-Type,Authorization".to_string()),
        )
    }

    pub fn from_values(origins: &str, methods: &str, headers: &str) -> Self {
        Self {
            allowed_origins: split_list(origins),
            allowed_methods: split_list(methods),
            allowed_headers: split_list(headers),
        }
    }

    /// `*` anywhere in the origin list opens the API to every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
