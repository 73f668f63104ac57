//! Report repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use inspecthub_core::error::{AppError, ErrorKind};
use inspecthub_core::result::AppResult;
use inspecthub_core::types::{InspectionId, UserId};
use inspecthub_entity::inspection::Inspection;
use inspecthub_entity::report::Report;

use super::inspection::{lock_inspection, write_inspection};
use super::is_unique_violation;
use crate::store::{ReportStore, Transition};

/// Repository for report rows.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn create_report_with_transition(
        &self,
        report: Report,
        transition: Transition,
    ) -> AppResult<(Report, Inspection)> {
        let inspection_id = report.inspection_id;
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // The parent row lock serializes concurrent report attempts.
        let mut inspection = lock_inspection(&mut tx, inspection_id).await?;
        transition(&mut inspection)?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM reports WHERE inspection_id = $1)")
                .bind(inspection_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check for report", e)
                })?;
        if exists {
            return Err(AppError::conflict(format!(
                "A report already exists for inspection {inspection_id}"
            )));
        }

        let inspection = write_inspection(&mut tx, &inspection).await?;

        let report = sqlx::query_as::<_, Report>(
            "INSERT INTO reports (id, inspection_id, title, summary, defect_classification, \
             image_reference, confidence, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(report.id)
        .bind(report.inspection_id)
        .bind(&report.title)
        .bind(&report.summary)
        .bind(&report.defect_classification)
        .bind(&report.image_reference)
        .bind(report.confidence)
        .bind(report.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!(
                    "A report already exists for inspection {inspection_id}"
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create report", e)
            }
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit report", e)
        })?;

        debug!(inspection_id = %inspection_id, report_id = %report.id, "Report stored");
        Ok((report, inspection))
    }

    async fn find_report_by_inspection(
        &self,
        inspection_id: InspectionId,
    ) -> AppResult<Option<Report>> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE inspection_id = $1")
            .bind(inspection_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find report", e))
    }

    async fn list_reports_for_customer(&self, customer_id: UserId) -> AppResult<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            "SELECT r.* FROM reports r \
             JOIN inspections i ON i.id = r.inspection_id \
             WHERE i.customer_id = $1 \
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reports", e))
    }
}
