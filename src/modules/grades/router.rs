use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_grade, get_grades, get_student_grades, update_grade};

pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_grades).post(create_grade))
        .route("/{id}", get(get_student_grades).put(update_grade))
}
