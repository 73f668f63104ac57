//! No-op storage double.
//!
//! Accepts every batch without writing bytes anywhere and hands out
//! deterministic `memory://` URLs. The batches it has accepted can be
//! inspected, which is what the integration tests rely on.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use inspecthub_core::result::AppResult;
use inspecthub_core::traits::storage::{
    ImageStorage, ImageUpload, StoredBatch, raw_batch_prefix, raw_object_key,
};
use inspecthub_core::types::InspectionId;

/// Storage double that records batches instead of storing them.
#[derive(Debug, Default)]
pub struct NoopImageStorage {
    accepted: Mutex<Vec<StoredBatch>>,
}

impl NoopImageStorage {
    /// Creates an empty double.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch accepted so far, in arrival order.
    pub async fn accepted_batches(&self) -> Vec<StoredBatch> {
        self.accepted.lock().await.clone()
    }
}

#[async_trait]
impl ImageStorage for NoopImageStorage {
    fn provider_type(&self) -> &str {
        "noop"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put_batch(
        &self,
        inspection_id: &InspectionId,
        images: Vec<ImageUpload>,
    ) -> AppResult<StoredBatch> {
        let batch = StoredBatch {
            reference: raw_batch_prefix(inspection_id),
            objects: images
                .iter()
                .map(|image| raw_object_key(inspection_id, &image.file_name))
                .collect(),
        };
        debug!(inspection_id = %inspection_id, count = batch.objects.len(), "Discarded image batch");

        self.accepted.lock().await.push(batch.clone());
        Ok(batch)
    }

    async fn signed_url(&self, reference: &str, ttl: Duration) -> AppResult<String> {
        Ok(format!(
            "memory://{}?ttl={}",
            reference.trim_start_matches('/'),
            ttl.as_secs()
        ))
    }
}
