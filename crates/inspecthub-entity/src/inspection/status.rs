//! Inspection and image-analysis status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use inspecthub_core::AppError;

/// Booking status of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inspection_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    /// Requested by a customer, waiting in the open pool.
    Pending,
    /// Claimed by a pilot.
    Scheduled,
    /// Flown and reported.
    Completed,
    /// Withdrawn before completion.
    Cancelled,
}

impl InspectionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [InspectionStatus; 4] = [
        InspectionStatus::Pending,
        InspectionStatus::Scheduled,
        InspectionStatus::Completed,
        InspectionStatus::Cancelled,
    ];

    /// Check if the inspection is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InspectionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid status '{s}'. Must be one of: pending, scheduled, completed, cancelled"
            ))),
        }
    }
}

/// Progress of the image analysis attached to an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "analysis_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// No imagery received yet.
    NotStarted,
    /// Imagery uploaded, analysis under way.
    Processing,
    /// Analysis finished.
    Completed,
    /// Analysis failed.
    Failed,
}

impl AnalysisStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
