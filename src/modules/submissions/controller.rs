use axum::{Json, extract::State};
use tracing::instrument;

use campus_core::AppError;
use campus_models::CreatedResponse;
use campus_models::submissions::{CreateSubmissionDto, SubmissionView};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::SubmissionService;

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionDto,
    responses(
        (status = 200, description = "Submission stored", body = CreatedResponse),
        (status = 400, description = "Unknown class or activity, not enrolled, past due or already graded"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Submission already exists")
    ),
    tag = "Submissions",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_submission(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSubmissionDto>,
) -> Result<Json<CreatedResponse>, AppError> {
    let submission = SubmissionService::create_submission(&state.db, dto).await?;
    Ok(Json(CreatedResponse::new(
        "Submission created successfully",
        submission.id,
    )))
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    responses(
        (status = 200, description = "Submissions for the caller's classes", body = Vec<SubmissionView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Submissions",
    security(("session_cookie" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id()))]
pub async fn get_submissions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<SubmissionView>>, AppError> {
    let submissions =
        SubmissionService::get_teacher_submissions(&state.db, auth_user.id()).await?;
    Ok(Json(submissions))
}
