//! Inspection lifecycle operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use inspecthub_auth::Identity;
use inspecthub_auth::rbac::{Operation, require};
use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::traits::clock::Clock;
use inspecthub_core::traits::storage::{ImageStorage, ImageUpload, StoredBatch};
use inspecthub_core::types::InspectionId;
use inspecthub_database::store::InspectionStore;
use inspecthub_entity::inspection::{
    CreateInspection, Inspection, InspectionQuery, InspectionScope, InspectionStatus,
};

/// Fields a customer supplies when requesting an inspection.
#[derive(Debug, Clone)]
pub struct NewInspection {
    /// Site to inspect.
    pub location: String,
    /// Requested flight date.
    pub scheduled_date: DateTime<Utc>,
    /// Package tier.
    pub package: String,
}

/// Result of an image upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// The inspection after the upload was recorded.
    pub inspection: Inspection,
    /// What the storage collaborator stored.
    pub batch: StoredBatch,
}

/// Owns the inspection state machine as seen by callers.
#[derive(Debug, Clone)]
pub struct InspectionService {
    inspections: Arc<dyn InspectionStore>,
    storage: Arc<dyn ImageStorage>,
    clock: Arc<dyn Clock>,
}

impl InspectionService {
    /// Creates a new inspection service.
    pub fn new(
        inspections: Arc<dyn InspectionStore>,
        storage: Arc<dyn ImageStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inspections,
            storage,
            clock,
        }
    }

    /// Requests a new inspection owned by the calling customer.
    pub async fn create(&self, identity: &Identity, input: NewInspection) -> AppResult<Inspection> {
        require(identity, Operation::CreateInspection)?;

        let location = input.location.trim();
        let package = input.package.trim();
        if location.is_empty() {
            return Err(AppError::validation("Location must not be empty"));
        }
        if package.is_empty() {
            return Err(AppError::validation("Package must not be empty"));
        }

        let inspection = CreateInspection {
            customer_id: identity.user_id,
            location: location.to_string(),
            scheduled_date: input.scheduled_date,
            package: package.to_string(),
        }
        .into_inspection(self.clock.now());

        let inspection = self.inspections.create_inspection(inspection).await?;
        info!(
            inspection_id = %inspection.id,
            customer_id = %identity.user_id,
            package = %inspection.package,
            "Inspection requested"
        );
        Ok(inspection)
    }

    /// Lists what the caller may see, newest first.
    ///
    /// Customers see their own requests; pilots see their assignments plus
    /// the open pool of pending requests.
    pub async fn list(
        &self,
        identity: &Identity,
        status: Option<InspectionStatus>,
    ) -> AppResult<Vec<Inspection>> {
        require(identity, Operation::ListInspections)?;
        self.inspections
            .list_inspections(InspectionQuery {
                scope: InspectionScope::for_caller(identity.user_id, identity.role),
                status,
            })
            .await
    }

    /// Fetches one inspection the caller may see.
    pub async fn get(&self, identity: &Identity, id: InspectionId) -> AppResult<Inspection> {
        require(identity, Operation::GetInspection)?;
        let inspection = self.find(id).await?;
        if !inspection.is_visible_to(identity.user_id, identity.role) {
            return Err(AppError::forbidden("You do not have access to this inspection"));
        }
        Ok(inspection)
    }

    /// Claims a pending inspection for the calling pilot.
    ///
    /// Of several concurrent claims exactly one wins; the others observe the
    /// new status and fail with `Conflict`.
    pub async fn assign(&self, identity: &Identity, id: InspectionId) -> AppResult<Inspection> {
        require(identity, Operation::AssignInspection)?;

        let pilot_id = identity.user_id;
        let now = self.clock.now();
        let inspection = self
            .inspections
            .modify_inspection(
                id,
                Box::new(move |inspection: &mut Inspection| inspection.assign(pilot_id, now)),
            )
            .await?;

        info!(inspection_id = %id, pilot_id = %pilot_id, "Pilot assigned");
        Ok(inspection)
    }

    /// Stores an image batch and records it on the inspection.
    ///
    /// The storage write holds no lock. Ownership and status are checked
    /// before it and re-checked in the final update, so a cancellation that
    /// lands mid-upload still wins.
    pub async fn upload(
        &self,
        identity: &Identity,
        id: InspectionId,
        images: Vec<ImageUpload>,
    ) -> AppResult<UploadOutcome> {
        require(identity, Operation::UploadImages)?;
        if images.is_empty() {
            return Err(AppError::validation("At least one image is required"));
        }

        let pilot_id = identity.user_id;
        let mut probe = self.find(id).await?;
        probe.record_upload(pilot_id, String::new(), self.clock.now())?;

        let count = images.len();
        let batch = self.storage.put_batch(&id, images).await?;

        let reference = batch.reference.clone();
        let now = self.clock.now();
        let inspection = match self
            .inspections
            .modify_inspection(
                id,
                Box::new(move |inspection: &mut Inspection| {
                    inspection.record_upload(pilot_id, reference, now)
                }),
            )
            .await
        {
            Ok(inspection) => inspection,
            Err(e) => {
                warn!(
                    inspection_id = %id,
                    reference = %batch.reference,
                    objects = batch.objects.len(),
                    error = %e,
                    "Upload rejected after storing images; batch is orphaned"
                );
                return Err(e);
            }
        };

        info!(
            inspection_id = %id,
            pilot_id = %pilot_id,
            images = count,
            reference = %batch.reference,
            "Image batch recorded"
        );
        Ok(UploadOutcome { inspection, batch })
    }

    /// Applies a caller-requested status change.
    ///
    /// `new_status` is parsed here; an unknown value is a validation error.
    pub async fn update_status(
        &self,
        identity: &Identity,
        id: InspectionId,
        new_status: &str,
    ) -> AppResult<Inspection> {
        require(identity, Operation::UpdateStatus)?;
        let target: InspectionStatus = new_status.trim().parse()?;

        let actor_id = identity.user_id;
        let actor_role = identity.role;
        let now = self.clock.now();
        let inspection = self
            .inspections
            .modify_inspection(
                id,
                Box::new(move |inspection: &mut Inspection| {
                    inspection.change_status(actor_id, actor_role, target, now)
                }),
            )
            .await?;

        info!(
            inspection_id = %id,
            actor_id = %actor_id,
            role = %actor_role,
            status = %target,
            "Inspection status changed"
        );
        Ok(inspection)
    }

    async fn find(&self, id: InspectionId) -> AppResult<Inspection> {
        self.inspections
            .find_inspection(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Inspection {id} not found")))
    }
}
