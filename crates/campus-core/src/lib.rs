//! # Campus Core
//!
//! Core types, errors, and utilities for the Campus API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use campus_core::errors::AppError;
//! use campus_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let hash = hash_password("secure_password", 10)?;
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
