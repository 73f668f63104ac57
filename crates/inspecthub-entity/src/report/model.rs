//! Report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::types::{InspectionId, ReportId};

/// Highest accepted confidence score.
pub const MAX_CONFIDENCE: i32 = 100;

/// Findings filed by a pilot for one inspection.
///
/// At most one report exists per inspection; the database enforces this with
/// a unique index on `inspection_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Report {
    /// Unique report identifier.
    pub id: ReportId,
    /// The inspection this report belongs to.
    pub inspection_id: InspectionId,
    /// Short headline.
    pub title: String,
    /// Free-form summary of the findings.
    pub summary: Option<String>,
    /// Defect class detected by the analysis (crack, corrosion, ...).
    pub defect_classification: Option<String>,
    /// Storage reference or absolute URL of the annotated image.
    pub image_reference: Option<String>,
    /// Analysis confidence, 0 to 100.
    pub confidence: Option<i32>,
    /// When the report was filed.
    pub created_at: DateTime<Utc>,
}

/// Data required to file a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReport {
    /// Target inspection.
    pub inspection_id: InspectionId,
    /// Short headline.
    pub title: String,
    /// Summary of findings.
    pub summary: Option<String>,
    /// Defect class.
    pub defect_classification: Option<String>,
    /// Annotated image reference.
    pub image_reference: Option<String>,
    /// Confidence score.
    pub confidence: Option<i32>,
}

impl CreateReport {
    /// Checks field-level constraints before any state is touched.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Report title must not be empty"));
        }
        if let Some(confidence) = self.confidence
            && !(0..=MAX_CONFIDENCE).contains(&confidence)
        {
            return Err(AppError::validation(format!(
                "Confidence must be between 0 and {MAX_CONFIDENCE}, got {confidence}"
            )));
        }
        Ok(())
    }

    /// Materializes the row that a store will insert.
    pub fn into_report(self, now: DateTime<Utc>) -> Report {
        Report {
            id: ReportId::new(),
            inspection_id: self.inspection_id,
            title: self.title,
            summary: self.summary,
            defect_classification: self.defect_classification,
            image_reference: self.image_reference,
            confidence: self.confidence,
            created_at: now,
        }
    }
}
