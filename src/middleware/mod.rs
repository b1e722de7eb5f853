//! Request gates for the `/api` tree.
//!
//! - [`auth`]: the authentication gate, which reads the session cookie, verifies
//!   it and stores the caller's identity as an [`auth::AuthUser`] request
//!   extension
//! - [`role`]: the authorization gate, which admits the request when the
//!   caller's roles intersect a route group's allow-list
//!
//! The authentication gate runs first (it wraps the whole `/api` router); the
//! role gates are `route_layer`s on each nested group.

pub mod auth;
pub mod role;
