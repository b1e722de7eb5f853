//! # Campus Models
//!
//! Row types and request/response DTOs for the Campus API.
//!
//! Row types derive [`sqlx::FromRow`] and are what the generic table accessor
//! decodes into. Request DTOs derive [`validator::Validate`] and are read
//! through the API's `ValidatedJson` extractor.

pub mod activities;
pub mod auth;
pub mod classes;
pub mod common;
pub mod courses;
pub mod enrolments;
pub mod grades;
pub mod history;
pub mod materials;
pub mod me;
pub mod serde;
pub mod submissions;
pub mod users;

pub use common::{CreatedResponse, MessageResponse, NamedRef, PersonSummary};
pub use history::{HistoryEntry, Standing};
