use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use campus::campus_auth::{Claims, Role};
use campus::middleware::auth::AuthUser;
use campus::middleware::role::{
    require_admin, require_student, require_teacher, require_teacher_or_student,
};
use tower::ServiceExt;

fn claims_with(roles: Vec<Role>) -> Claims {
    Claims {
        id: 1,
        email: "test@campus.test".to_string(),
        roles,
        iat: 1_700_000_000,
        exp: 9_999_999_999,
    }
}

/// Router whose only route sits behind `gate`, with the caller's identity
/// injected the way the authentication gate would.
fn gated_app<F, Fut>(gate: F, roles: Option<Vec<Role>>) -> Router
where
    F: Fn(Request, Next) -> Fut + Clone + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<Response, campus::campus_core::AppError>>
        + Send
        + 'static,
{
    let router = Router::new()
        .route("/", get(|| async { "ok" }))
        .route_layer(middleware::from_fn(gate));

    match roles {
        Some(roles) => router.layer(middleware::from_fn(
            move |mut req: Request, next: Next| {
                let user = AuthUser(claims_with(roles.clone()));
                async move {
                    req.extensions_mut().insert(user);
                    next.run(req).await
                }
            },
        )),
        None => router,
    }
}

async fn status_of(app: Router) -> StatusCode {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_admin_gate() {
    assert_eq!(
        status_of(gated_app(require_admin, Some(vec![Role::Admin]))).await,
        StatusCode::OK
    );
    assert_eq!(
        status_of(gated_app(require_admin, Some(vec![Role::Teacher, Role::Student]))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_teacher_gate() {
    assert_eq!(
        status_of(gated_app(require_teacher, Some(vec![Role::Teacher]))).await,
        StatusCode::OK
    );
    assert_eq!(
        status_of(gated_app(require_teacher, Some(vec![Role::Admin]))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_student_gate() {
    assert_eq!(
        status_of(gated_app(require_student, Some(vec![Role::Student]))).await,
        StatusCode::OK
    );
    assert_eq!(
        status_of(gated_app(require_student, Some(vec![Role::Teacher]))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_teacher_or_student_gate() {
    for roles in [vec![Role::Teacher], vec![Role::Student], vec![Role::Admin, Role::Student]] {
        assert_eq!(
            status_of(gated_app(require_teacher_or_student, Some(roles))).await,
            StatusCode::OK
        );
    }
    assert_eq!(
        status_of(gated_app(require_teacher_or_student, Some(vec![Role::Admin]))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_empty_role_set_is_forbidden() {
    assert_eq!(
        status_of(gated_app(require_teacher_or_student, Some(vec![]))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    assert_eq!(
        status_of(gated_app(require_admin, None)).await,
        StatusCode::UNAUTHORIZED
    );
}
