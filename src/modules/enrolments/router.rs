use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_enrolment, delete_student_enrolment, get_active_enrolments, get_class_enrolments,
    get_student_enrolments, update_student_enrolment,
};

pub fn init_enrolments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_active_enrolments).post(create_enrolment))
        .route("/{id}", get(get_class_enrolments))
        .route(
            "/student/{id}",
            get(get_student_enrolments)
                .put(update_student_enrolment)
                .delete(delete_student_enrolment),
        )
}
