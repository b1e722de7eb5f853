//! # Campus Config
//!
//! Configuration types for the Campus API, loaded from environment variables.
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: HTTP listener address
//! - [`jwt`]: Session token signing and cookie settings
//! - [`hashing`]: bcrypt work factor
//! - [`cors`]: Cross-origin resource sharing settings
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{CorsConfig, DatabaseConfig, JwtConfig};
//!
//! let database = DatabaseConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod hashing;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use hashing::PasswordConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Splits a comma separated environment value into trimmed, non-empty items.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
