//! In-memory store using a Tokio mutex for single-process deployments.
//!
//! Every operation takes the one state lock, so a transition's precondition
//! check and its write can never interleave with another request. Used by the
//! integration tests and by development runs without PostgreSQL.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::types::{InspectionId, UserId};
use inspecthub_entity::inspection::{Inspection, InspectionQuery, InspectionStatus};
use inspecthub_entity::report::Report;
use inspecthub_entity::user::User;

use crate::store::{InspectionStore, ReportStore, Transition, UserStore};

/// Internal state for the memory-backed store.
#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<UserId, User>,
    inspections: HashMap<InspectionId, Inspection>,
    /// Keyed by inspection id: at most one report per inspection.
    reports: HashMap<InspectionId, Report>,
}

/// Memory-backed implementation of every store trait.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, uuid::Uuid)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: User) -> AppResult<User> {
        let mut state = self.state.lock().await;

        let taken = state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(AppError::validation("Email already registered"));
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }
}

#[async_trait]
impl InspectionStore for MemoryStore {
    async fn create_inspection(&self, inspection: Inspection) -> AppResult<Inspection> {
        let mut state = self.state.lock().await;
        state.inspections.insert(inspection.id, inspection.clone());
        Ok(inspection)
    }

    async fn find_inspection(&self, id: InspectionId) -> AppResult<Option<Inspection>> {
        let state = self.state.lock().await;
        Ok(state.inspections.get(&id).cloned())
    }

    async fn list_inspections(&self, query: InspectionQuery) -> AppResult<Vec<Inspection>> {
        let state = self.state.lock().await;
        let mut found: Vec<Inspection> = state
            .inspections
            .values()
            .filter(|i| query.matches(i))
            .cloned()
            .collect();
        newest_first(&mut found, |i| (i.created_at, i.id.into_uuid()));
        Ok(found)
    }

    async fn modify_inspection(
        &self,
        id: InspectionId,
        transition: Transition,
    ) -> AppResult<Inspection> {
        let mut state = self.state.lock().await;
        let current = state
            .inspections
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Inspection {id} not found")))?;

        // Work on a copy so a failed transition leaves the stored row untouched.
        let mut next = current.clone();
        transition(&mut next)?;
        state.inspections.insert(id, next.clone());
        Ok(next)
    }

    async fn count_for_customer(
        &self,
        customer_id: UserId,
        status: Option<InspectionStatus>,
    ) -> AppResult<i64> {
        let state = self.state.lock().await;
        let count = state
            .inspections
            .values()
            .filter(|i| i.customer_id == customer_id)
            .filter(|i| status.is_none_or(|s| i.status == s))
            .count();
        Ok(count as i64)
    }

    async fn next_pending_for_customer(
        &self,
        customer_id: UserId,
    ) -> AppResult<Option<Inspection>> {
        let state = self.state.lock().await;
        Ok(state
            .inspections
            .values()
            .filter(|i| i.customer_id == customer_id && i.status == InspectionStatus::Pending)
            .min_by_key(|i| (i.scheduled_date, i.id))
            .cloned())
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn create_report_with_transition(
        &self,
        report: Report,
        transition: Transition,
    ) -> AppResult<(Report, Inspection)> {
        let mut state = self.state.lock().await;
        let inspection_id = report.inspection_id;

        let current = state.inspections.get(&inspection_id).ok_or_else(|| {
            AppError::not_found(format!("Inspection {inspection_id} not found"))
        })?;
        let mut next = current.clone();
        transition(&mut next)?;

        if state.reports.contains_key(&inspection_id) {
            return Err(AppError::conflict(format!(
                "A report already exists for inspection {inspection_id}"
            )));
        }

        state.inspections.insert(inspection_id, next.clone());
        state.reports.insert(inspection_id, report.clone());
        Ok((report, next))
    }

    async fn find_report_by_inspection(
        &self,
        inspection_id: InspectionId,
    ) -> AppResult<Option<Report>> {
        let state = self.state.lock().await;
        Ok(state.reports.get(&inspection_id).cloned())
    }

    async fn list_reports_for_customer(&self, customer_id: UserId) -> AppResult<Vec<Report>> {
        let state = self.state.lock().await;
        let mut found: Vec<Report> = state
            .reports
            .values()
            .filter(|r| {
                state
                    .inspections
                    .get(&r.inspection_id)
                    .is_some_and(|i| i.customer_id == customer_id)
            })
            .cloned()
            .collect();
        newest_first(&mut found, |r| (r.created_at, r.id.into_uuid()));
        Ok(found)
    }
}
