#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campus::campus_auth::{Role, sign_session_token};
use campus::campus_config::{CorsConfig, JwtConfig, PasswordConfig};
use campus::campus_core::hash_password;
use campus::realtime::NotificationHub;
use campus::router::init_router;
use campus::state::AppState;
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "secret123";

pub struct TestUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expires_in: 3600,
            cookie_name: "SESSION_TOKEN".to_string(),
            cookie_secure: false,
        },
        cors_config: CorsConfig::from_values(
            "http://localhost:3000",
            "GET,POST,PUT,DELETE",
            "content-type",
        ),
        password_config: PasswordConfig::with_cost(4),
        notifications: NotificationHub::new(),
    }
}

pub fn setup_test_app(pool: PgPool) -> (Router, AppState) {
    let state = test_state(pool);
    (init_router(state.clone()), state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@campus.test", Uuid::new_v4())
}

pub async fn create_user(pool: &PgPool, name: &str, roles: &[Role]) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD, 4).unwrap();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(&email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    for role in roles {
        sqlx::query("INSERT INTO associated (id_user, id_profile) VALUES ($1, $2)")
            .bind(id)
            .bind(role.id())
            .execute(pool)
            .await
            .unwrap();
    }

    TestUser {
        id,
        name: name.to_string(),
        email,
        roles: roles.to_vec(),
    }
}

pub async fn create_course(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO courses (name, description, max_students) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind("Test course")
    .bind(30)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_class(
    pool: &PgPool,
    course_id: i64,
    teacher_id: i64,
    name: &str,
    max_students: i32,
) -> i64 {
    let today = Utc::now().date_naive();

    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO classes (id_course, id_teacher, starts_on, ends_on, period, name, max_students)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING id"#,
    )
    .bind(course_id)
    .bind(teacher_id)
    .bind(today)
    .bind(today + Duration::days(120))
    .bind("morning")
    .bind(name)
    .bind(max_students)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn enrol(pool: &PgPool, student_id: i64, class_id: i64, status: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO enrolment (id_student, id_class, active, status) VALUES ($1, $2, TRUE, $3) RETURNING id",
    )
    .bind(student_id)
    .bind(class_id)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_activity(
    pool: &PgPool,
    class_id: i64,
    title: &str,
    max_grade: f64,
    due_date: NaiveDate,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO activities (id_class, title, description, type, max_grade, due_date)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id"#,
    )
    .bind(class_id)
    .bind(title)
    .bind("Test activity")
    .bind("homework")
    .bind(max_grade)
    .bind(due_date)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_submission(pool: &PgPool, student_id: i64, activity_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO submissions (id_student, id_activity, content) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(student_id)
    .bind(activity_id)
    .bind("My answer")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_grade(pool: &PgPool, student_id: i64, activity_id: i64, grade: f64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO grades (id_student, id_activity, grade) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(student_id)
    .bind(activity_id)
    .bind(grade)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn in_days(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// `Cookie` header value carrying a freshly signed session for `user`.
pub fn session_cookie(state: &AppState, user: &TestUser) -> String {
    let token =
        sign_session_token(user.id, &user.email, user.roles.clone(), &state.jwt_config).unwrap();
    format!("{}={}", state.jwt_config.cookie_name, token)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
