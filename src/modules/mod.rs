//! Feature modules, one per entity. Each has a `controller` (HTTP handlers),
//! a `service` (queries and business rules) and a `router`.

pub mod activities;
pub mod auth;
pub mod classes;
pub mod courses;
pub mod enrolments;
pub mod grades;
pub mod history;
pub mod materials;
pub mod me;
pub mod submissions;
pub mod users;
