use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_activity, get_activities, get_activity, update_activity};

pub fn init_activities_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_activities).post(create_activity))
        .route("/{id}", get(get_activity).put(update_activity))
}
