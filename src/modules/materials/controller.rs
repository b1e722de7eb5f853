use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use campus_core::AppError;
use campus_models::CreatedResponse;
use campus_models::materials::{CreateMaterialDto, MaterialView};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::MaterialService;

#[utoipa::path(
    post,
    path = "/api/materials",
    request_body = CreateMaterialDto,
    responses(
        (status = 200, description = "Material posted", body = CreatedResponse),
        (status = 400, description = "Invalid input or unknown class"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Material already exists")
    ),
    tag = "Materials",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn create_material(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateMaterialDto>,
) -> Result<Json<CreatedResponse>, AppError> {
    let material = MaterialService::create_material(&state.db, dto).await?;
    Ok(Json(CreatedResponse::new(
        "Material created successfully",
        material.id,
    )))
}

#[utoipa::path(
    get,
    path = "/api/materials",
    responses(
        (status = 200, description = "All materials", body = Vec<MaterialView>)
    ),
    tag = "Materials",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_materials(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaterialView>>, AppError> {
    Ok(Json(MaterialService::get_materials(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/materials/{id}",
    params(("id" = i64, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material", body = MaterialView),
        (status = 404, description = "Material not found")
    ),
    tag = "Materials",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MaterialView>, AppError> {
    Ok(Json(MaterialService::get_material(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/materials/class/{id}",
    params(("id" = i64, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Materials of the class", body = Vec<MaterialView>),
        (status = 404, description = "Class not found")
    ),
    tag = "Materials",
    security(("session_cookie" = []))
)]
#[instrument(skip(state))]
pub async fn get_class_materials(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MaterialView>>, AppError> {
    Ok(Json(MaterialService::get_class_materials(&state.db, id).await?))
}
