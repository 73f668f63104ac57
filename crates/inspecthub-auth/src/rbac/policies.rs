//! Which roles may invoke which operation.
//!
//! Roles are disjoint capability sets, not a hierarchy. Each operation
//! declares its own allowed set; ownership rules (is this *your*
//! inspection?) are enforced further in, by the lifecycle itself.

use serde::{Deserialize, Serialize};

use inspecthub_entity::user::UserRole;

const CUSTOMER_ONLY: &[UserRole] = &[UserRole::Customer];
const PILOT_ONLY: &[UserRole] = &[UserRole::Pilot];
const ANY_ROLE: &[UserRole] = &UserRole::ALL;

/// Every protected operation exposed by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read the caller's own profile.
    ViewProfile,
    /// Request a new inspection.
    CreateInspection,
    /// List visible inspections.
    ListInspections,
    /// Read one inspection.
    GetInspection,
    /// Claim a pending inspection.
    AssignInspection,
    /// Upload imagery for an assigned inspection.
    UploadImages,
    /// Change an inspection's status.
    UpdateStatus,
    /// File the report for an inspection.
    CreateReport,
    /// Read the report of one inspection.
    GetReport,
    /// List every report on the caller's inspections.
    ListCustomerReports,
    /// Read the caller's booking analytics.
    ViewAnalytics,
}

impl Operation {
    /// The roles allowed to attempt this operation.
    pub fn allowed_roles(self) -> &'static [UserRole] {
        match self {
            Self::CreateInspection | Self::ListCustomerReports | Self::ViewAnalytics => {
                CUSTOMER_ONLY
            }
            Self::AssignInspection | Self::UploadImages | Self::CreateReport => PILOT_ONLY,
            Self::ViewProfile
            | Self::ListInspections
            | Self::GetInspection
            | Self::UpdateStatus
            | Self::GetReport => ANY_ROLE,
        }
    }

    /// Whether `role` appears in this operation's allowed set.
    pub fn permits(self, role: UserRole) -> bool {
        self.allowed_roles().contains(&role)
    }
}
