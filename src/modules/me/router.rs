use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_me, update_me};

pub fn init_me_router() -> Router<AppState> {
    Router::new().route("/", get(get_me).put(update_me))
}
