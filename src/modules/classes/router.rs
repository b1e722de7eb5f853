use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_class, delete_class, get_class, get_classes, get_top_classes, update_class,
};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_classes).post(create_class))
        .route("/top", get(get_top_classes))
        .route("/{id}", get(get_class).put(update_class).delete(delete_class))
}
