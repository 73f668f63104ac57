//! Inspection repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use inspecthub_core::error::{AppError, ErrorKind};
use inspecthub_core::result::AppResult;
use inspecthub_core::types::{InspectionId, UserId};
use inspecthub_entity::inspection::{Inspection, InspectionQuery, InspectionScope, InspectionStatus};

use crate::store::{InspectionStore, Transition};

/// Repository for inspection rows.
#[derive(Debug, Clone)]
pub struct InspectionRepository {
    pool: PgPool,
}

impl InspectionRepository {
    /// Create a new inspection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock an inspection row for the rest of the transaction.
pub(crate) async fn lock_inspection(
    conn: &mut PgConnection,
    id: InspectionId,
) -> AppResult<Inspection> {
    sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock inspection", e))?
        .ok_or_else(|| AppError::not_found(format!("Inspection {id} not found")))
}

/// Write back every mutable column of an inspection.
pub(crate) async fn write_inspection(
    conn: &mut PgConnection,
    inspection: &Inspection,
) -> AppResult<Inspection> {
    sqlx::query_as::<_, Inspection>(
        "UPDATE inspections SET pilot_id = $2, status = $3, analysis_status = $4, \
         assigned_at = $5, started_at = $6, completed_at = $7, image_batch_reference = $8 \
         WHERE id = $1 RETURNING *",
    )
    .bind(inspection.id)
    .bind(inspection.pilot_id)
    .bind(inspection.status)
    .bind(inspection.analysis_status)
    .bind(inspection.assigned_at)
    .bind(inspection.started_at)
    .bind(inspection.completed_at)
    .bind(&inspection.image_batch_reference)
    .fetch_one(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update inspection", e))
}

#[async_trait]
impl InspectionStore for InspectionRepository {
    async fn create_inspection(&self, inspection: Inspection) -> AppResult<Inspection> {
        sqlx::query_as::<_, Inspection>(
            "INSERT INTO inspections (id, customer_id, pilot_id, status, analysis_status, \
             location, scheduled_date, package, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(inspection.id)
        .bind(inspection.customer_id)
        .bind(inspection.pilot_id)
        .bind(inspection.status)
        .bind(inspection.analysis_status)
        .bind(&inspection.location)
        .bind(inspection.scheduled_date)
        .bind(&inspection.package)
        .bind(inspection.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create inspection", e))
    }

    async fn find_inspection(&self, id: InspectionId) -> AppResult<Option<Inspection>> {
        sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find inspection", e))
    }

    async fn list_inspections(&self, query: InspectionQuery) -> AppResult<Vec<Inspection>> {
        let (scope_clause, scope_id) = match query.scope {
            InspectionScope::Customer(id) => ("customer_id = $1", id),
            InspectionScope::Pilot(id) => ("(pilot_id = $1 OR status = 'pending')", id),
        };
        let sql = format!(
            "SELECT * FROM inspections WHERE {scope_clause} \
             AND ($2::inspection_status IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC"
        );

        sqlx::query_as::<_, Inspection>(&sql)
            .bind(scope_id)
            .bind(query.status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list inspections", e))
    }

    async fn modify_inspection(
        &self,
        id: InspectionId,
        transition: Transition,
    ) -> AppResult<Inspection> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut inspection = lock_inspection(&mut tx, id).await?;
        // Dropping `tx` on error rolls back and releases the row lock.
        transition(&mut inspection)?;
        let updated = write_inspection(&mut tx, &inspection).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit inspection update", e)
        })?;

        debug!(inspection_id = %id, status = %updated.status, "Inspection updated");
        Ok(updated)
    }

    async fn count_for_customer(
        &self,
        customer_id: UserId,
        status: Option<InspectionStatus>,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inspections WHERE customer_id = $1 \
             AND ($2::inspection_status IS NULL OR status = $2)",
        )
        .bind(customer_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count inspections", e))
    }

    async fn next_pending_for_customer(
        &self,
        customer_id: UserId,
    ) -> AppResult<Option<Inspection>> {
        sqlx::query_as::<_, Inspection>(
            "SELECT * FROM inspections WHERE customer_id = $1 AND status = 'pending' \
             ORDER BY scheduled_date ASC, id ASC LIMIT 1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find next pending inspection", e)
        })
    }
}
