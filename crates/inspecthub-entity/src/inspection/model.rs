//! Inspection entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inspecthub_core::types::{InspectionId, UserId};

use super::status::{AnalysisStatus, InspectionStatus};
use crate::user::UserRole;

/// A requested drone inspection and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Inspection {
    /// Unique inspection identifier.
    pub id: InspectionId,
    /// The customer who requested the inspection.
    pub customer_id: UserId,
    /// The pilot who claimed it. Set exactly once, by assignment.
    pub pilot_id: Option<UserId>,
    /// Booking status.
    pub status: InspectionStatus,
    /// Image analysis progress.
    pub analysis_status: AnalysisStatus,
    /// Site to inspect.
    pub location: String,
    /// Requested flight date.
    pub scheduled_date: DateTime<Utc>,
    /// Package tier (Basic, Advanced, Premium, Elite, ...). Not constrained.
    pub package: String,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When a pilot claimed it.
    pub assigned_at: Option<DateTime<Utc>>,
    /// When imagery was received.
    pub started_at: Option<DateTime<Utc>>,
    /// When it reached `completed`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Storage reference of the raw image batch.
    pub image_batch_reference: Option<String>,
}

impl Inspection {
    /// Whether `user_id` acting as `role` may read this inspection.
    ///
    /// Customers see their own requests; pilots see their assigned work and
    /// the open pool of pending requests.
    pub fn is_visible_to(&self, user_id: UserId, role: UserRole) -> bool {
        match role {
            UserRole::Customer => self.customer_id == user_id,
            UserRole::Pilot => {
                self.pilot_id == Some(user_id) || self.status == InspectionStatus::Pending
            }
        }
    }

    /// Whether `pilot_id` is the assigned pilot.
    pub fn is_assigned_to(&self, pilot_id: UserId) -> bool {
        self.pilot_id == Some(pilot_id)
    }
}

/// Data required to create a new inspection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInspection {
    /// Requesting customer.
    pub customer_id: UserId,
    /// Site to inspect.
    pub location: String,
    /// Requested flight date.
    pub scheduled_date: DateTime<Utc>,
    /// Package tier.
    pub package: String,
}

impl CreateInspection {
    /// Materializes a fresh `pending` inspection.
    pub fn into_inspection(self, now: DateTime<Utc>) -> Inspection {
        Inspection {
            id: InspectionId::new(),
            customer_id: self.customer_id,
            pilot_id: None,
            status: InspectionStatus::Pending,
            analysis_status: AnalysisStatus::NotStarted,
            location: self.location,
            scheduled_date: self.scheduled_date,
            package: self.package,
            created_at: now,
            assigned_at: None,
            started_at: None,
            completed_at: None,
            image_batch_reference: None,
        }
    }
}

/// Which slice of inspections a caller is allowed to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionScope {
    /// Inspections owned by this customer.
    Customer(UserId),
    /// Inspections assigned to this pilot, plus every pending one.
    Pilot(UserId),
}

impl InspectionScope {
    /// Derives the scope from the caller's identity.
    pub fn for_caller(user_id: UserId, role: UserRole) -> Self {
        match role {
            UserRole::Customer => Self::Customer(user_id),
            UserRole::Pilot => Self::Pilot(user_id),
        }
    }
}

/// Listing criteria: a scope plus an optional status filter (AND).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionQuery {
    /// Visibility scope.
    pub scope: InspectionScope,
    /// Optional exact-status filter.
    pub status: Option<InspectionStatus>,
}

impl InspectionQuery {
    /// Evaluates the query against a single inspection.
    pub fn matches(&self, inspection: &Inspection) -> bool {
        let in_scope = match self.scope {
            InspectionScope::Customer(id) => inspection.customer_id == id,
            InspectionScope::Pilot(id) => {
                inspection.pilot_id == Some(id) || inspection.status == InspectionStatus::Pending
            }
        };
        in_scope && self.status.is_none_or(|s| inspection.status == s)
    }
}
