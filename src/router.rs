use axum::http::{HeaderName, HeaderValue, Method};
use axum::{Router, middleware};
use campus_config::CorsConfig;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::middleware::role::{
    require_admin, require_student, require_teacher, require_teacher_or_student,
};
use crate::modules::activities::init_activities_router;
use crate::modules::auth::init_auth_router;
use crate::modules::classes::init_classes_router;
use crate::modules::courses::init_courses_router;
use crate::modules::enrolments::init_enrolments_router;
use crate::modules::grades::init_grades_router;
use crate::modules::history::init_history_router;
use crate::modules::materials::init_materials_router;
use crate::modules::me::init_me_router;
use crate::modules::submissions::init_submissions_router;
use crate::modules::users::init_users_router;
use crate::realtime::init_notifications_router;
use crate::state::AppState;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(methods).allow_headers(headers);

    // Credentials cannot be combined with a wildcard origin
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(origins).allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest(
            "/users",
            init_users_router().route_layer(middleware::from_fn(require_admin)),
        )
        .nest(
            "/courses",
            init_courses_router().route_layer(middleware::from_fn(require_admin)),
        )
        .nest(
            "/classes",
            init_classes_router().route_layer(middleware::from_fn(require_admin)),
        )
        .nest(
            "/materials",
            init_materials_router().route_layer(middleware::from_fn(require_teacher_or_student)),
        )
        .nest(
            "/activities",
            init_activities_router().route_layer(middleware::from_fn(require_teacher_or_student)),
        )
        .nest(
            "/grades",
            init_grades_router().route_layer(middleware::from_fn(require_teacher_or_student)),
        )
        .nest(
            "/enrolments",
            init_enrolments_router().route_layer(middleware::from_fn(require_teacher_or_student)),
        )
        .nest(
            "/submissions",
            init_submissions_router().route_layer(middleware::from_fn(require_teacher_or_student)),
        )
        .nest(
            "/history",
            init_history_router().route_layer(middleware::from_fn(require_student)),
        )
        .nest(
            "/notifications",
            init_notifications_router().route_layer(middleware::from_fn(require_teacher)),
        )
        .nest("/me", init_me_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", init_auth_router())
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
}
