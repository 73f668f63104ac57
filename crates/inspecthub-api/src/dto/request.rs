//! Request DTOs with validation.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use inspecthub_core::error::AppError;

/// Unwraps a JSON body and runs its field validation.
///
/// Malformed JSON and failed rules both come back as `Validation`.
pub fn validated<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(req) = body.map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// `customer` or `pilot`.
    pub role: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// New inspection request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInspectionRequest {
    /// Site to inspect.
    #[validate(length(min = 1, max = 500, message = "Location is required"))]
    pub location: String,
    /// Requested flight date.
    pub scheduled_date: DateTime<Utc>,
    /// Package tier.
    #[serde(default = "default_package")]
    #[validate(length(min = 1, max = 100))]
    pub package: String,
}

fn default_package() -> String {
    "Basic".to_string()
}

/// `GET /api/inspections` filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInspectionsQuery {
    /// Only inspections in this status.
    pub status: Option<String>,
}

/// Status change body. The target may also come as `?new_status=`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status: Option<String>,
}

/// Status change query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusQuery {
    /// Target status.
    pub new_status: Option<String>,
}

/// New report request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReportRequest {
    /// Inspection the report belongs to.
    pub inspection_id: Uuid,
    /// Headline.
    #[validate(length(min = 1, max = 300, message = "Title is required"))]
    pub title: String,
    /// Findings.
    pub summary: Option<String>,
    /// Defect class.
    pub defect_classification: Option<String>,
    /// Annotated image: a storage reference or an absolute URL.
    #[serde(alias = "image_url")]
    pub image_reference: Option<String>,
    /// Confidence percentage.
    #[validate(range(min = 0, max = 100, message = "Confidence must be between 0 and 100"))]
    pub confidence: Option<i32>,
}

/// Query string of a signed file link.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedFileQuery {
    /// Unix expiry.
    pub expires: i64,
    /// Link signature.
    pub signature: String,
}
