//! Inspection lifecycle handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use inspecthub_core::error::AppError;
use inspecthub_core::traits::storage::ImageUpload;
use inspecthub_core::types::InspectionId;
use inspecthub_entity::inspection::{Inspection, InspectionStatus};
use inspecthub_service::NewInspection;

use crate::dto::request::{
    CreateInspectionRequest, ListInspectionsQuery, UpdateStatusQuery, UpdateStatusRequest,
    validated,
};
use crate::dto::response::{ApiResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// Multipart field carrying the images.
const FILES_FIELD: &str = "files";

/// POST /api/inspections
pub async fn create_inspection(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<CreateInspectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Inspection>>), ApiError> {
    let req = validated(body)?;
    let inspection = state
        .inspection_service
        .create(
            &auth,
            NewInspection {
                location: req.location,
                scheduled_date: req.scheduled_date,
                package: req.package,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(inspection))))
}

/// GET /api/inspections?status=...
pub async fn list_inspections(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListInspectionsQuery>,
) -> Result<Json<ApiResponse<Vec<Inspection>>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<InspectionStatus>)
        .transpose()?;

    let inspections = state.inspection_service.list(&auth, status).await?;
    Ok(Json(ApiResponse::ok(inspections)))
}

/// GET /api/inspections/{id}
pub async fn get_inspection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Inspection>>, ApiError> {
    let id: InspectionId = parse_id(&id)?;
    let inspection = state.inspection_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(inspection)))
}

/// PATCH /api/inspections/{id}/assign
pub async fn assign_inspection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Inspection>>, ApiError> {
    let id: InspectionId = parse_id(&id)?;
    let inspection = state.inspection_service.assign(&auth, id).await?;
    Ok(Json(ApiResponse::ok(inspection)))
}

/// PATCH /api/inspections/{id}/status
///
/// The target status is read from the JSON body, or from `?new_status=`
/// when no body is sent.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<UpdateStatusQuery>,
    body: Option<Json<UpdateStatusRequest>>,
) -> Result<Json<ApiResponse<Inspection>>, ApiError> {
    let id: InspectionId = parse_id(&id)?;
    let new_status = body
        .and_then(|Json(req)| req.status)
        .or(query.new_status)
        .ok_or_else(|| AppError::validation("A target status is required"))?;

    let inspection = state
        .inspection_service
        .update_status(&auth, id, &new_status)
        .await?;
    Ok(Json(ApiResponse::ok(inspection)))
}

/// POST /api/inspections/{id}/upload (multipart, repeated `files` field)
pub async fn upload_images(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let id: InspectionId = parse_id(&id)?;

    let mut images = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(String::from)
            .unwrap_or_else(|| format!("image-{}", images.len() + 1));
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;

        images.push(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    let outcome = state.inspection_service.upload(&auth, id, images).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}
