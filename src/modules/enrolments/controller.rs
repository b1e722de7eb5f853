use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::MessageResponse;
use campus_models::enrolments::{
    ActiveEnrolment, ClassEnrolment, CreateEnrolmentDto, Enrolment, EnrolmentClassQuery,
    EnrolmentCreated, StudentEnrolment, UpdateEnrolmentDto,
};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::EnrolmentService;

#[utoipa::path(
    post,
    path = "/api/enrolments",
    request_body = CreateEnrolmentDto,
    responses(
        (status = 200, description = "Enrolment created; priority is true when a failed enrolment in the course was replaced", body = EnrolmentCreated),
        (status = 400, description = "Missing fields, unknown student or class, own class, or class full"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Enrolment already exists and not failed")
    ),
    tag = "Enrolments",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_enrolment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEnrolmentDto>,
) -> Result<Json<EnrolmentCreated>, AppError> {
    let created = EnrolmentService::create_enrolment(&state.db, &state.notifications, dto).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/api/enrolments",
    responses(
        (status = 200, description = "All active enrolments", body = Vec<ActiveEnrolment>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Enrolments",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_active_enrolments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActiveEnrolment>>, AppError> {
    let enrolments = EnrolmentService::get_active_enrolments(&state.db).await?;
    Ok(Json(enrolments))
}

#[utoipa::path(
    get,
    path = "/api/enrolments/{id}",
    params(("id" = i64, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Active enrolments in the class", body = Vec<ClassEnrolment>),
        (status = 404, description = "No enrolments found for this class")
    ),
    tag = "Enrolments",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_class_enrolments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ClassEnrolment>>, AppError> {
    let enrolments = EnrolmentService::get_class_enrolments(&state.db, id).await?;
    Ok(Json(enrolments))
}

#[utoipa::path(
    get,
    path = "/api/enrolments/student/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Enrolments of the student", body = Vec<StudentEnrolment>),
        (status = 404, description = "No enrolments found for this student")
    ),
    tag = "Enrolments",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_enrolments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<StudentEnrolment>>, AppError> {
    let enrolments = EnrolmentService::get_student_enrolments(&state.db, id).await?;
    Ok(Json(enrolments))
}

#[utoipa::path(
    put,
    path = "/api/enrolments/student/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = UpdateEnrolmentDto,
    responses(
        (status = 200, description = "Enrolment updated", body = Enrolment),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Enrolment not found"),
        (status = 409, description = "Another live enrolment exists")
    ),
    tag = "Enrolments",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn update_student_enrolment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateEnrolmentDto>,
) -> Result<Json<Enrolment>, AppError> {
    let enrolment = EnrolmentService::update_student_enrolment(&state.db, id, dto).await?;
    Ok(Json(enrolment))
}

#[utoipa::path(
    delete,
    path = "/api/enrolments/student/{id}",
    params(
        ("id" = i64, Path, description = "Student ID"),
        EnrolmentClassQuery
    ),
    responses(
        (status = 200, description = "Enrolment deleted", body = MessageResponse),
        (status = 404, description = "Enrolment not found")
    ),
    tag = "Enrolments",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn delete_student_enrolment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<EnrolmentClassQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    EnrolmentService::delete_student_enrolment(&state.db, id, query.id_class).await?;
    Ok(Json(MessageResponse::new("Enrolment deleted successfully")))
}
