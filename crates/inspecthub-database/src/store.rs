//! Store traits consumed by the service layer.
//!
//! State-changing inspection operations take a [`Transition`]: the store
//! loads the current row under its lock, runs the closure, and persists the
//! result only if the closure succeeded. The precondition check inside the
//! closure therefore always sees the latest committed state.
//!
//! Rows are materialized (ids, timestamps) by the caller before insertion,
//! so every store writes exactly what the service's clock produced.

use std::sync::Arc;

use async_trait::async_trait;

use inspecthub_core::result::AppResult;
use inspecthub_core::types::{InspectionId, UserId};
use inspecthub_entity::inspection::{Inspection, InspectionQuery, InspectionStatus};
use inspecthub_entity::report::Report;
use inspecthub_entity::user::User;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{InspectionRepository, ReportRepository, UserRepository};

/// A check-then-mutate step applied to an inspection under its row lock.
pub type Transition = Box<dyn FnOnce(&mut Inspection) -> AppResult<()> + Send>;

/// Persistence for accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new user. A taken email yields a `Validation` error.
    async fn create_user(&self, user: User) -> AppResult<User>;

    /// Look up a user by normalized email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Look up a user by id.
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>>;
}

/// Persistence for inspections.
#[async_trait]
pub trait InspectionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a freshly created inspection.
    async fn create_inspection(&self, inspection: Inspection) -> AppResult<Inspection>;

    /// Fetch one inspection.
    async fn find_inspection(&self, id: InspectionId) -> AppResult<Option<Inspection>>;

    /// List inspections matching `query`, newest first, ties broken by id
    /// (descending).
    async fn list_inspections(&self, query: InspectionQuery) -> AppResult<Vec<Inspection>>;

    /// Atomically apply `transition` to the inspection and persist it.
    ///
    /// Returns `NotFound` if the inspection does not exist, or the
    /// transition's own error (in which case nothing is written).
    async fn modify_inspection(&self, id: InspectionId, transition: Transition)
    -> AppResult<Inspection>;

    /// Count a customer's inspections, optionally restricted to one status.
    async fn count_for_customer(
        &self,
        customer_id: UserId,
        status: Option<InspectionStatus>,
    ) -> AppResult<i64>;

    /// The customer's pending inspection with the soonest scheduled date.
    async fn next_pending_for_customer(&self, customer_id: UserId)
    -> AppResult<Option<Inspection>>;
}

/// Persistence for reports.
#[async_trait]
pub trait ReportStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a report and apply `transition` to its parent inspection in one
    /// atomic step.
    ///
    /// Fails with `NotFound` if the inspection is missing, with the
    /// transition's error if it rejects the caller, and with `Conflict` if the
    /// inspection already has a report. Neither row is written unless all
    /// checks pass.
    async fn create_report_with_transition(
        &self,
        report: Report,
        transition: Transition,
    ) -> AppResult<(Report, Inspection)>;

    /// The report filed for an inspection, if any.
    async fn find_report_by_inspection(&self, inspection_id: InspectionId)
    -> AppResult<Option<Report>>;

    /// All reports whose parent inspection belongs to `customer_id`, newest
    /// first.
    async fn list_reports_for_customer(&self, customer_id: UserId) -> AppResult<Vec<Report>>;
}

/// One handle per store trait, as wired into the services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Account persistence.
    pub users: Arc<dyn UserStore>,
    /// Inspection persistence.
    pub inspections: Arc<dyn InspectionStore>,
    /// Report persistence.
    pub reports: Arc<dyn ReportStore>,
}

impl Stores {
    /// sqlx repositories sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.pool().clone())),
            inspections: Arc::new(InspectionRepository::new(pool.pool().clone())),
            reports: Arc::new(ReportRepository::new(pool.pool().clone())),
        }
    }

    /// All three traits served by one in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            inspections: Arc::new(store.clone()),
            reports: Arc::new(store),
        }
    }
}
