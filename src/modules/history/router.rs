use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_my_history, get_student_history};

pub fn init_history_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_my_history))
        .route("/{id}", get(get_student_history))
}
