//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inspecthub_core::types::UserId;
use inspecthub_entity::inspection::{AnalysisStatus, Inspection};
use inspecthub_entity::user::{User, UserRole};
use inspecthub_service::{LoginOutcome, UploadOutcome};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The logged-in account.
    pub user: UserResponse,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            access_token: outcome.token.token,
            token_type: "bearer".to_string(),
            expires_at: outcome.token.expires_at,
            user: outcome.user.into(),
        }
    }
}

/// Result of an image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Number of files stored.
    pub file_count: usize,
    /// Batch reference recorded on the inspection.
    pub reference: String,
    /// Analysis status after the upload.
    pub analysis_status: AnalysisStatus,
    /// The updated inspection.
    pub inspection: Inspection,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            file_count: outcome.batch.objects.len(),
            reference: outcome.batch.reference,
            analysis_status: outcome.inspection.analysis_status,
            inspection: outcome.inspection,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active storage provider.
    pub storage: String,
    /// Whether the storage provider answered its health check.
    pub storage_healthy: bool,
}
