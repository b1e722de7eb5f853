use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_material, get_class_materials, get_material, get_materials};

pub fn init_materials_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_materials).post(create_material))
        .route("/class/{id}", get(get_class_materials))
        .route("/{id}", get(get_material))
}
