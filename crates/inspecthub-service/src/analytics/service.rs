//! Read-side booking analytics for customers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inspecthub_auth::Identity;
use inspecthub_auth::rbac::{Operation, require};
use inspecthub_core::result::AppResult;
use inspecthub_database::store::InspectionStore;
use inspecthub_entity::inspection::InspectionStatus;

/// A customer's booking summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAnalytics {
    /// Inspections ever requested.
    pub total_inspections: i64,
    /// Inspections that reached `completed`.
    pub completed_inspections: i64,
    /// `completed_inspections` times the configured per-inspection saving.
    pub cost_saved: i64,
    /// Scheduled date of the soonest pending inspection.
    pub next_booking_date: Option<DateTime<Utc>>,
}

/// Aggregates counts over a customer's inspections.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    inspections: Arc<dyn InspectionStore>,
    cost_saved_per_inspection: i64,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(inspections: Arc<dyn InspectionStore>, cost_saved_per_inspection: i64) -> Self {
        Self {
            inspections,
            cost_saved_per_inspection,
        }
    }

    /// Summarizes the calling customer's bookings.
    pub async fn for_customer(&self, identity: &Identity) -> AppResult<CustomerAnalytics> {
        require(identity, Operation::ViewAnalytics)?;
        let customer_id = identity.user_id;

        let total_inspections = self.inspections.count_for_customer(customer_id, None).await?;
        let completed_inspections = self
            .inspections
            .count_for_customer(customer_id, Some(InspectionStatus::Completed))
            .await?;
        let next_booking_date = self
            .inspections
            .next_pending_for_customer(customer_id)
            .await?
            .map(|inspection| inspection.scheduled_date);

        Ok(CustomerAnalytics {
            total_inspections,
            completed_inspections,
            cost_saved: completed_inspections.saturating_mul(self.cost_saved_per_inspection),
            next_booking_date,
        })
    }
}
