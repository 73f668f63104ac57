//! Serves objects behind signed links issued by the local storage provider.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::Response;

use inspecthub_core::error::AppError;

use crate::dto::request::SignedFileQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /files/{*reference}?expires=...&signature=...
pub async fn download_signed(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Query(query): Query<SignedFileQuery>,
) -> Result<Response, ApiError> {
    let data = state
        .storage
        .open_signed(&reference, query.expires, &query.signature)
        .await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type_for(&reference))
        .header(header::CONTENT_LENGTH, data.len())
        .header(header::CACHE_CONTROL, "private, no-store")
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

fn content_type_for(reference: &str) -> &'static str {
    let extension = reference
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
