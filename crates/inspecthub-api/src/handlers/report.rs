//! Report and analytics handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use inspecthub_core::types::InspectionId;
use inspecthub_entity::report::Report;
use inspecthub_service::{CustomerAnalytics, NewReport};

use crate::dto::request::{CreateReportRequest, validated};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<CreateReportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Report>>), ApiError> {
    let req = validated(body)?;
    let report = state
        .report_service
        .create(
            &auth,
            NewReport {
                inspection_id: req.inspection_id.into(),
                title: req.title,
                summary: req.summary,
                defect_classification: req.defect_classification,
                image_reference: req.image_reference,
                confidence: req.confidence,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(report))))
}

/// GET /api/reports/{inspection_id}
pub async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(inspection_id): Path<String>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let inspection_id: InspectionId = parse_id(&inspection_id)?;
    let report = state
        .report_service
        .get_by_inspection(&auth, inspection_id)
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/reports/customer/all
pub async fn list_customer_reports(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Report>>>, ApiError> {
    let reports = state.report_service.list_for_customer(&auth).await?;
    Ok(Json(ApiResponse::ok(reports)))
}

/// GET /api/reports/analytics/me
pub async fn my_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CustomerAnalytics>>, ApiError> {
    let analytics = state.analytics_service.for_customer(&auth).await?;
    Ok(Json(ApiResponse::ok(analytics)))
}
