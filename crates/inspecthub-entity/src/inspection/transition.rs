//! The inspection state machine.
//!
//! ```text
//!              assign               report / pilot update
//!   pending ───────────▶ scheduled ─────────────────────▶ completed
//!      │                     │
//!      │ customer cancel     │ customer or pilot cancel
//!      ▼                     ▼
//!   cancelled ◀──────────────┘
//! ```
//!
//! Every function here is a pure check-then-mutate over `&mut Inspection`.
//! Stores call them while holding the row lock, which makes the precondition
//! check and the write a single atomic step. On error the inspection is left
//! untouched.

use chrono::{DateTime, Utc};

use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::types::UserId;

use super::model::Inspection;
use super::status::{AnalysisStatus, InspectionStatus};
use crate::user::UserRole;

/// Whether the generic status-update path allows `from → to` for `role`.
///
/// Assignment (`pending → scheduled`) is not reachable here; it has its own
/// entry point so that `pilot_id` is written in exactly one place.
pub fn is_allowed_status_change(
    role: UserRole,
    from: InspectionStatus,
    to: InspectionStatus,
) -> bool {
    use InspectionStatus::*;

    match role {
        UserRole::Customer => matches!((from, to), (Pending, Cancelled) | (Scheduled, Cancelled)),
        UserRole::Pilot => matches!((from, to), (Scheduled, Completed) | (Scheduled, Cancelled)),
    }
}

impl Inspection {
    /// Claims a pending inspection for `pilot_id`.
    ///
    /// Fails with `Conflict` (echoing the current status) unless the
    /// inspection is still pending.
    pub fn assign(&mut self, pilot_id: UserId, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != InspectionStatus::Pending {
            return Err(AppError::conflict(format!(
                "Inspection is already {}",
                self.status
            )));
        }

        self.pilot_id = Some(pilot_id);
        self.status = InspectionStatus::Scheduled;
        self.assigned_at = Some(now);
        Ok(())
    }

    /// Attaches an uploaded image batch and starts analysis.
    ///
    /// Only the assigned pilot may upload, and only while the inspection is
    /// scheduled. The booking status is not changed.
    pub fn record_upload(
        &mut self,
        pilot_id: UserId,
        reference: String,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.ensure_assigned_to(pilot_id)?;

        if self.status != InspectionStatus::Scheduled {
            return Err(AppError::conflict(format!(
                "Images can only be uploaded to a scheduled inspection; it is {}",
                self.status
            )));
        }

        self.image_batch_reference = Some(reference);
        self.analysis_status = AnalysisStatus::Processing;
        self.started_at = Some(now);
        Ok(())
    }

    /// Applies a caller-requested status change.
    ///
    /// Ownership is checked first (`Forbidden`), then the transition table
    /// (`Conflict`). Customers may only cancel.
    pub fn change_status(
        &mut self,
        actor_id: UserId,
        actor_role: UserRole,
        target: InspectionStatus,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        match actor_role {
            UserRole::Customer => {
                if self.customer_id != actor_id {
                    return Err(AppError::forbidden("Not your inspection"));
                }
                if target != InspectionStatus::Cancelled {
                    return Err(AppError::forbidden("Customers can only cancel"));
                }
            }
            UserRole::Pilot => self.ensure_assigned_to(actor_id)?,
        }

        if !is_allowed_status_change(actor_role, self.status, target) {
            return Err(AppError::conflict(format!(
                "Cannot change inspection status from {} to {}",
                self.status, target
            )));
        }

        self.status = target;
        if target == InspectionStatus::Completed {
            self.completed_at = Some(now);
        }
        Ok(())
    }

    /// Completes the inspection as part of filing its report.
    ///
    /// A scheduled inspection moves to `completed`. An inspection the pilot
    /// already marked completed keeps its original completion time.
    pub fn complete_with_report(&mut self, pilot_id: UserId, now: DateTime<Utc>) -> AppResult<()> {
        self.ensure_assigned_to(pilot_id)?;

        match self.status {
            InspectionStatus::Scheduled => {
                self.status = InspectionStatus::Completed;
                self.completed_at = Some(now);
                Ok(())
            }
            InspectionStatus::Completed => {
                self.completed_at.get_or_insert(now);
                Ok(())
            }
            InspectionStatus::Pending | InspectionStatus::Cancelled => Err(AppError::conflict(
                format!("Cannot file a report for a {} inspection", self.status),
            )),
        }
    }

    fn ensure_assigned_to(&self, pilot_id: UserId) -> AppResult<()> {
        if self.is_assigned_to(pilot_id) {
            Ok(())
        } else {
            Err(AppError::forbidden("You are not assigned to this inspection"))
        }
    }
}
