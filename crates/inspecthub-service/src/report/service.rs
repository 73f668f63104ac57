//! Report filing and retrieval.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use inspecthub_auth::Identity;
use inspecthub_auth::rbac::{Operation, require};
use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::traits::clock::Clock;
use inspecthub_core::traits::storage::{ImageStorage, is_external_url};
use inspecthub_core::types::InspectionId;
use inspecthub_database::store::{InspectionStore, ReportStore};
use inspecthub_entity::inspection::Inspection;
use inspecthub_entity::report::{CreateReport, Report};
use inspecthub_entity::user::UserRole;

/// Fields a pilot supplies when filing a report.
#[derive(Debug, Clone)]
pub struct NewReport {
    /// Target inspection.
    pub inspection_id: InspectionId,
    /// Short headline.
    pub title: String,
    /// Summary of findings.
    pub summary: Option<String>,
    /// Defect class.
    pub defect_classification: Option<String>,
    /// Annotated image: a storage reference or an absolute URL.
    pub image_reference: Option<String>,
    /// Confidence, 0 to 100.
    pub confidence: Option<i32>,
}

/// Binds at most one report to each inspection.
#[derive(Debug, Clone)]
pub struct ReportService {
    reports: Arc<dyn ReportStore>,
    inspections: Arc<dyn InspectionStore>,
    storage: Arc<dyn ImageStorage>,
    clock: Arc<dyn Clock>,
    /// Lifetime of resolved image URLs.
    url_ttl: Duration,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        reports: Arc<dyn ReportStore>,
        inspections: Arc<dyn InspectionStore>,
        storage: Arc<dyn ImageStorage>,
        clock: Arc<dyn Clock>,
        url_ttl: Duration,
    ) -> Self {
        Self {
            reports,
            inspections,
            storage,
            clock,
            url_ttl,
        }
    }

    /// Files the report and completes the inspection in one atomic step.
    ///
    /// A second report for the same inspection is rejected with `Conflict`;
    /// the existing report is left as is.
    pub async fn create(&self, identity: &Identity, input: NewReport) -> AppResult<Report> {
        require(identity, Operation::CreateReport)?;

        let draft = CreateReport {
            inspection_id: input.inspection_id,
            title: input.title.trim().to_string(),
            summary: input.summary,
            defect_classification: input.defect_classification,
            image_reference: input.image_reference,
            confidence: input.confidence,
        };
        draft.validate()?;

        let pilot_id = identity.user_id;
        let now = self.clock.now();
        let (report, inspection) = self
            .reports
            .create_report_with_transition(
                draft.into_report(now),
                Box::new(move |inspection: &mut Inspection| {
                    inspection.complete_with_report(pilot_id, now)
                }),
            )
            .await?;

        info!(
            report_id = %report.id,
            inspection_id = %inspection.id,
            pilot_id = %pilot_id,
            "Report filed, inspection completed"
        );
        self.resolve(report).await
    }

    /// The report of one inspection, if the caller may read it.
    ///
    /// Customers must own the inspection; pilots must be assigned to it.
    pub async fn get_by_inspection(
        &self,
        identity: &Identity,
        inspection_id: InspectionId,
    ) -> AppResult<Report> {
        require(identity, Operation::GetReport)?;

        let inspection = self
            .inspections
            .find_inspection(inspection_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Inspection {inspection_id} not found")))?;

        let allowed = match identity.role {
            UserRole::Customer => inspection.customer_id == identity.user_id,
            UserRole::Pilot => inspection.is_assigned_to(identity.user_id),
        };
        if !allowed {
            return Err(AppError::forbidden("You do not have access to this report"));
        }

        let report = self
            .reports
            .find_report_by_inspection(inspection_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("No report for inspection {inspection_id}"))
            })?;
        self.resolve(report).await
    }

    /// Every report on the calling customer's inspections, newest first.
    pub async fn list_for_customer(&self, identity: &Identity) -> AppResult<Vec<Report>> {
        require(identity, Operation::ListCustomerReports)?;

        let reports = self
            .reports
            .list_reports_for_customer(identity.user_id)
            .await?;

        let mut resolved = Vec::with_capacity(reports.len());
        for report in reports {
            resolved.push(self.resolve(report).await?);
        }
        Ok(resolved)
    }

    /// Swaps a stored image reference for a fresh retrieval URL.
    ///
    /// Only the returned copy changes; the stored reference stays as filed.
    async fn resolve(&self, mut report: Report) -> AppResult<Report> {
        if let Some(reference) = report.image_reference.as_deref()
            && !is_external_url(reference)
        {
            let url = self.storage.signed_url(reference, self.url_ttl).await?;
            report.image_reference = Some(url);
        }
        Ok(report)
    }
}
