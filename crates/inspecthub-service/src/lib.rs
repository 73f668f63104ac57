//! # inspecthub-service
//!
//! Business logic service layer for InspectHub. Each service orchestrates
//! the store traits, the image storage collaborator, and the auth primitives
//! to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references. The caller's [`Identity`] is an
//! explicit argument of every protected operation.
//!
//! [`Identity`]: inspecthub_auth::Identity

pub mod account;
pub mod analytics;
pub mod inspection;
pub mod report;

pub use account::{AccountService, LoginOutcome, Registration};
pub use analytics::{AnalyticsService, CustomerAnalytics};
pub use inspection::{InspectionService, NewInspection, UploadOutcome};
pub use report::{NewReport, ReportService};

#[cfg(test)]
pub(crate) mod testing;
