//! # Campus Auth
//!
//! Session token codec and role model for the Campus API.
//!
//! - [`claims`]: Claims carried inside a session token
//! - [`jwt`]: Signing and verification of session tokens
//! - [`roles`]: The fixed role set and the authorization predicate
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{Role, sign_session_token, verify_session_token, has_any_role};
//! use campus_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = sign_session_token(7, "ana@campus.dev", vec![Role::Teacher], &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! assert!(has_any_role(&claims.roles, &[Role::Teacher, Role::Student]));
//! ```

pub mod claims;
pub mod jwt;
pub mod roles;

pub use claims::Claims;
pub use jwt::{sign_session_token, verify_session_token};
pub use roles::{Role, has_any_role, is_valid_profile_set};
