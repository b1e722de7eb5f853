mod common;

use std::time::Duration;

use axum::http::StatusCode;
use campus::campus_auth::Role;
use campus::realtime::{CLASS_FULL_EVENT, NotificationHub};
use chrono::Utc;
use common::{
    create_class, create_course, create_user, enrol, send, session_cookie, setup_test_app,
};
use serde_json::{Value, json};
use sqlx::PgPool;

fn enrolment_body(student_id: i64, class_id: i64) -> Value {
    json!({
        "id_student": student_id,
        "id_class": class_id,
        "enrolled_at": Utc::now().to_rfc3339(),
        "active": true
    })
}

async fn count_enrolments(pool: &PgPool, student_id: i64, class_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrolment WHERE id_student = $1 AND id_class = $2",
    )
    .bind(student_id)
    .bind(class_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrol_student(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;
    let class = create_class(&pool, course, teacher.id, "Rust A", 10).await;

    let (app, state) = setup_test_app(pool.clone());
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(student.id, class)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Enrolment created successfully");
    assert_eq!(body["priority"], false);

    let status: String = sqlx::query_scalar(
        "SELECT status FROM enrolment WHERE id_student = $1 AND id_class = $2",
    )
    .bind(student.id)
    .bind(class)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "ongoing");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrol_with_plain_date(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;
    let class = create_class(&pool, course, teacher.id, "Rust A", 10).await;

    let (app, state) = setup_test_app(pool.clone());
    let cookie = session_cookie(&state, &teacher);

    let (status, _) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(json!({
            "id_student": student.id,
            "id_class": class,
            "enrolled_at": "2025-03-01",
            "active": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let enrolled_on: String = sqlx::query_scalar(
        "SELECT to_char(enrolled_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') FROM enrolment WHERE id_student = $1",
    )
    .bind(student.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(enrolled_on, "2025-03-01");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_full_class_rejects_and_notifies_teacher(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let first = create_user(&pool, "Ann", &[Role::Student]).await;
    let second = create_user(&pool, "Ben", &[Role::Student]).await;
    let late = create_user(&pool, "Cid", &[Role::Student]).await;
    let course = create_course(&pool, "Databases").await;
    let class = create_class(&pool, course, teacher.id, "DB A", 2).await;
    enrol(&pool, first.id, class, "ongoing").await;
    enrol(&pool, second.id, class, "ongoing").await;

    let (app, state) = setup_test_app(pool.clone());
    let mut subscription = state
        .notifications
        .subscribe(NotificationHub::teacher_room(teacher.id));
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(late.id, class)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Max students reached. Teacher notified");
    assert_eq!(count_enrolments(&pool, late.id, class).await, 0);

    let notification = tokio::time::timeout(Duration::from_secs(2), subscription.recv())
        .await
        .expect("notification in time")
        .expect("hub open");

    assert_eq!(notification.event, CLASS_FULL_EVENT);
    assert_eq!(notification.data["id_class"], class);
    assert_eq!(notification.data["teacherId"], teacher.id);
    assert_eq!(notification.data["id_student"], late.id);

    assert!(
        tokio::time::timeout(Duration::from_millis(200), subscription.recv())
            .await
            .is_err(),
        "one rejected attempt sends one notification"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_enrolments_take_one_seat(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let ann = create_user(&pool, "Ann", &[Role::Student]).await;
    let ben = create_user(&pool, "Ben", &[Role::Student]).await;
    let course = create_course(&pool, "Concurrency").await;
    let class = create_class(&pool, course, teacher.id, "Conc A", 1).await;

    let (app, state) = setup_test_app(pool.clone());
    let mut subscription = state
        .notifications
        .subscribe(NotificationHub::teacher_room(teacher.id));
    let cookie = session_cookie(&state, &teacher);

    let ((first, _), (second, _)) = tokio::join!(
        send(
            &app,
            "POST",
            "/api/enrolments",
            Some(&cookie),
            Some(enrolment_body(ann.id, class)),
        ),
        send(
            &app,
            "POST",
            "/api/enrolments",
            Some(&cookie),
            Some(enrolment_body(ben.id, class)),
        ),
    );

    let mut statuses = vec![first, second];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM enrolment WHERE id_class = $1 AND active = TRUE",
    )
    .bind(class)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(active, 1);

    let notification = tokio::time::timeout(Duration::from_secs(2), subscription.recv())
        .await
        .expect("notification in time")
        .expect("hub open");
    assert_eq!(notification.event, CLASS_FULL_EVENT);
    assert!(
        tokio::time::timeout(Duration::from_millis(200), subscription.recv())
            .await
            .is_err()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_enrolments_do_not_take_seats(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let dropped = create_user(&pool, "Ann", &[Role::Student]).await;
    let student = create_user(&pool, "Ben", &[Role::Student]).await;
    let course = create_course(&pool, "Networks").await;
    let class = create_class(&pool, course, teacher.id, "Net A", 1).await;
    enrol(&pool, dropped.id, class, "ongoing").await;
    sqlx::query("UPDATE enrolment SET active = FALSE WHERE id_student = $1")
        .bind(dropped.id)
        .execute(&pool)
        .await
        .unwrap();

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &teacher);

    let (status, _) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(student.id, class)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_enrolment_in_course_gives_priority(pool: PgPool) {
    let teacher_a = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let teacher_b = create_user(&pool, "Theo", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let course = create_course(&pool, "Algorithms").await;
    let old_class = create_class(&pool, course, teacher_a.id, "Algo 2024", 10).await;
    let new_class = create_class(&pool, course, teacher_b.id, "Algo 2025", 10).await;
    enrol(&pool, student.id, old_class, "failed").await;

    let (app, state) = setup_test_app(pool.clone());
    let cookie = session_cookie(&state, &teacher_b);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(student.id, new_class)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority"], true);
    assert_eq!(count_enrolments(&pool, student.id, old_class).await, 0);
    assert_eq!(count_enrolments(&pool, student.id, new_class).await, 1);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/enrolments/student/{}", student.id),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id_class"], new_class);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_enrolment_in_other_course_is_kept(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let math = create_course(&pool, "Math").await;
    let art = create_course(&pool, "Art").await;
    let math_class = create_class(&pool, math, teacher.id, "Math A", 10).await;
    let art_class = create_class(&pool, art, teacher.id, "Art A", 10).await;
    enrol(&pool, student.id, math_class, "failed").await;

    let (app, state) = setup_test_app(pool.clone());
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(student.id, art_class)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority"], false);
    assert_eq!(count_enrolments(&pool, student.id, math_class).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_live_enrolment(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let course = create_course(&pool, "Compilers").await;
    let class = create_class(&pool, course, teacher.id, "Comp A", 10).await;
    enrol(&pool, student.id, class, "ongoing").await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(student.id, class)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Enrolment already exists and not failed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_enrol_in_own_class(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher, Role::Student]).await;
    let course = create_course(&pool, "Ethics").await;
    let class = create_class(&pool, course, teacher.id, "Ethics A", 10).await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(teacher.id, class)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot enrol on own class");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_students_can_be_enrolled(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let other = create_user(&pool, "Olga", &[Role::Teacher]).await;
    let course = create_course(&pool, "Logic").await;
    let class = create_class(&pool, course, teacher.id, "Logic A", 10).await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(other.id, class)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student not found");

    let student = create_user(&state.db, "Sam", &[Role::Student]).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(enrolment_body(student.id, 9_999)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Class not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolment_missing_fields(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/enrolments",
        Some(&cookie),
        Some(json!({ "id_student": 1, "active": true })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Missing fields:")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_enrolments_listing(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let ann = create_user(&pool, "Ann", &[Role::Student]).await;
    let ben = create_user(&pool, "Ben", &[Role::Student]).await;
    let course = create_course(&pool, "Physics").await;
    let class = create_class(&pool, course, teacher.id, "Phys A", 10).await;
    let empty_class = create_class(
        &pool,
        create_course(&pool, "Chemistry").await,
        teacher.id,
        "Chem A",
        10,
    )
    .await;
    enrol(&pool, ben.id, class, "ongoing").await;
    enrol(&pool, ann.id, class, "ongoing").await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &teacher);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/enrolments/{class}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["student_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ann", "Ben"]);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/enrolments/{empty_class}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/enrolments", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_student_enrolment(pool: PgPool) {
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let course = create_course(&pool, "Statistics").await;
    let class = create_class(&pool, course, teacher.id, "Stats A", 10).await;
    enrol(&pool, student.id, class, "ongoing").await;

    let (app, state) = setup_test_app(pool.clone());
    let cookie = session_cookie(&state, &teacher);
    let uri = format!("/api/enrolments/student/{}", student.id);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&cookie),
        Some(json!({ "id_class": class, "active": false, "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["active"], false);

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&cookie),
        Some(json!({ "id_class": class, "active": true, "status": "passed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("{uri}?id_class={class}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count_enrolments(&pool, student.id, class).await, 0);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("{uri}?id_class={class}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
