use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_submission, get_submissions};

pub fn init_submissions_router() -> Router<AppState> {
    Router::new().route("/", get(get_submissions).post(create_submission))
}
