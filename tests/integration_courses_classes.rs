mod common;

use axum::http::StatusCode;
use campus::campus_auth::Role;
use common::{
    create_activity, create_class, create_course, create_grade, create_user, enrol, in_days, send,
    session_cookie, setup_test_app,
};
use serde_json::{Value, json};
use sqlx::PgPool;

fn class_body(course_id: i64, teacher_id: i64, name: &str) -> Value {
    json!({
        "id_course": course_id,
        "id_teacher": teacher_id,
        "starts_on": "2025-02-01",
        "ends_on": "2025-06-30",
        "period": "evening",
        "name": name,
        "max_students": 25
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_crud(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);
    let body = json!({
        "name": "Distributed Systems",
        "description": "Consensus and replication",
        "max_students": 40
    });

    let (status, created) =
        send(&app, "POST", "/api/courses", Some(&cookie), Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["message"], "Course created successfully");
    let id = created["id"].as_i64().unwrap();

    let (status, conflict) = send(&app, "POST", "/api/courses", Some(&cookie), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["message"], "Course already exists");

    let uri = format!("/api/courses/{id}");
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&cookie),
        Some(json!({
            "name": "Distributed Systems II",
            "description": "Consensus, replication and sharding",
            "max_students": 30
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, course) = send(&app, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(course["name"], "Distributed Systems II");
    assert_eq!(course["max_students"], 30);
    assert_eq!(course["classes"], json!([]));

    let (status, deleted) = send(&app, "DELETE", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Course deleted successfully");

    let (status, _) = send(&app, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_validation(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, _) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&cookie),
        Some(json!({ "name": "", "description": "x", "max_students": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&cookie),
        Some(json!({ "name": "Math", "description": "x", "max_students": "ten" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid field type in request");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/courses/9999",
        Some(&cookie),
        Some(json!({ "name": "Math", "description": "x", "max_students": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_courses_list_their_classes(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let course = create_course(&pool, "Rust").await;
    create_class(&pool, course, teacher.id, "Rust A", 10).await;
    create_course(&pool, "Go").await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, body) = send(&app, "GET", "/api/courses", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 2);
    let rust = courses.iter().find(|c| c["name"] == "Rust").unwrap();
    assert_eq!(rust["classes"][0]["name"], "Rust A");
    assert_eq!(rust["classes"][0]["teacher"]["id"], teacher.id);
    assert_eq!(rust["classes"][0]["teacher"]["name"], "Tess");
    let go = courses.iter().find(|c| c["name"] == "Go").unwrap();
    assert_eq!(go["classes"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_averages(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let tess = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let theo = create_user(&pool, "Theo", &[Role::Teacher]).await;
    let ann = create_user(&pool, "Ann", &[Role::Student]).await;
    let ben = create_user(&pool, "Ben", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;
    let graded_class = create_class(&pool, course, tess.id, "Rust A", 10).await;
    let quiet_class = create_class(&pool, course, theo.id, "Rust B", 10).await;
    let quiz = create_activity(&pool, graded_class, "Quiz", 10.0, in_days(2)).await;
    create_grade(&pool, ann.id, quiz, 6.0).await;
    create_grade(&pool, ben.id, quiz, 9.0).await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/courses/averages/{course}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course_name"], "Rust");
    assert_eq!(
        body["classes"],
        json!([
            { "class_id": graded_class, "class_name": "Rust A", "average_grade": 7.5 },
            { "class_id": quiet_class, "class_name": "Rust B", "average_grade": null }
        ])
    );

    let (status, _) = send(&app, "GET", "/api/courses/averages/9999", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_crud(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let course = create_course(&pool, "Rust").await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, created) = send(
        &app,
        "POST",
        "/api/classes",
        Some(&cookie),
        Some(class_body(course, teacher.id, "Rust Evening")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["message"], "Class created successfully");
    let id = created["id"].as_i64().unwrap();

    let (status, conflict) = send(
        &app,
        "POST",
        "/api/classes",
        Some(&cookie),
        Some(class_body(course, teacher.id, "Rust Evening 2")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        conflict["message"],
        "A class for this course and teacher already exists"
    );

    let uri = format!("/api/classes/{id}");
    let mut renamed = class_body(course, teacher.id, "Rust Night");
    renamed["archived"] = json!(true);
    let (status, _) = send(&app, "PUT", &uri, Some(&cookie), Some(renamed)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, class) = send(&app, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(class["name"], "Rust Night");
    assert_eq!(class["archived"], true);
    assert_eq!(class["course"]["name"], "Rust");
    assert_eq!(class["teacher"]["id"], teacher.id);
    assert_eq!(class["student_count"], 0);

    let (status, _) = send(&app, "DELETE", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_references_and_dates(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let student = create_user(&pool, "Sam", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, body) = send(
        &app,
        "POST",
        "/api/classes",
        Some(&cookie),
        Some(class_body(9_999, teacher.id, "Nowhere")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Course not found");

    let (status, body) = send(
        &app,
        "POST",
        "/api/classes",
        Some(&cookie),
        Some(class_body(course, student.id, "Student led")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Teacher not found");

    let mut backwards = class_body(course, teacher.id, "Backwards");
    backwards["ends_on"] = json!("2025-01-01");
    let (status, _) = send(&app, "POST", "/api/classes", Some(&cookie), Some(backwards)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/classes/9999",
        Some(&cookie),
        Some(class_body(course, teacher.id, "Ghost")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_roster_standing(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let ann = create_user(&pool, "Ann", &[Role::Student]).await;
    let ben = create_user(&pool, "Ben", &[Role::Student]).await;
    let cid = create_user(&pool, "Cid", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;
    let class = create_class(&pool, course, teacher.id, "Rust A", 10).await;
    for student in [&ann, &ben, &cid] {
        enrol(&pool, student.id, class, "ongoing").await;
    }
    let quiz = create_activity(&pool, class, "Quiz", 10.0, in_days(2)).await;
    create_grade(&pool, ann.id, quiz, 8.0).await;
    create_grade(&pool, ben.id, quiz, 3.0).await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/classes/{class}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student_count"], 3);

    let roster: Vec<(String, Value, String)> = body["students"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["name"].as_str().unwrap().to_string(),
                s["average_grade"].clone(),
                s["status"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        roster,
        vec![
            ("Ann".to_string(), json!(8.0), "approved".to_string()),
            ("Ben".to_string(), json!(3.0), "failed".to_string()),
            ("Cid".to_string(), Value::Null, "no_grades".to_string()),
        ]
    );

    let (status, body) = send(&app, "GET", "/api/classes", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["students"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_roster_standing_below_pass_mark_before_rounding(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let teacher = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let dora = create_user(&pool, "Dora", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;
    let class = create_class(&pool, course, teacher.id, "Rust A", 10).await;
    enrol(&pool, dora.id, class, "ongoing").await;
    let quiz = create_activity(&pool, class, "Quiz", 10.0, in_days(2)).await;
    let essay = create_activity(&pool, class, "Essay", 10.0, in_days(3)).await;
    create_grade(&pool, dora.id, quiz, 4.99).await;
    create_grade(&pool, dora.id, essay, 5.0).await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/classes/{class}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"][0]["average_grade"], 5.0);
    assert_eq!(body["students"][0]["status"], "failed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_top_classes(pool: PgPool) {
    let admin = create_user(&pool, "Ana Admin", &[Role::Admin]).await;
    let tess = create_user(&pool, "Tess", &[Role::Teacher]).await;
    let theo = create_user(&pool, "Theo", &[Role::Teacher]).await;
    let ann = create_user(&pool, "Ann", &[Role::Student]).await;
    let ben = create_user(&pool, "Ben", &[Role::Student]).await;
    let course = create_course(&pool, "Rust").await;
    let small = create_class(&pool, course, tess.id, "Rust small", 10).await;
    let big = create_class(&pool, course, theo.id, "Rust big", 10).await;
    enrol(&pool, ann.id, small, "ongoing").await;
    enrol(&pool, ann.id, big, "ongoing").await;
    enrol(&pool, ben.id, big, "ongoing").await;

    let (app, state) = setup_test_app(pool);
    let cookie = session_cookie(&state, &admin);

    let (status, body) = send(&app, "GET", "/api/classes/top", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["class_id"], big);
    assert_eq!(body[0]["student_count"], 2);
    assert_eq!(body[1]["class_id"], small);

    let (status, body) = send(&app, "GET", "/api/classes/top?limit=1", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
