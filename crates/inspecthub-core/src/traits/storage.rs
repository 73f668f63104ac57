//! Image storage trait for pluggable binary storage backends.
//!
//! The core never inspects file contents: a batch of images goes in, an
//! opaque reference comes out, and a reference can later be turned into a
//! time-limited retrieval URL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::id::InspectionId;

/// One image received from a pilot upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as sent by the client.
    pub file_name: String,
    /// MIME type (if the client sent one).
    pub content_type: Option<String>,
    /// Raw file contents.
    pub data: Bytes,
}

/// Result of storing an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredBatch {
    /// Reference to the batch as a whole (a folder-like prefix).
    pub reference: String,
    /// Reference of every stored object, in upload order.
    pub objects: Vec<String>,
}

/// Trait for image storage backends.
///
/// Implementations exist for the local filesystem, S3-compatible object
/// stores, and a no-op double used in tests and development.
#[async_trait]
pub trait ImageStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store every image of one upload under the inspection's raw prefix.
    async fn put_batch(
        &self,
        inspection_id: &InspectionId,
        images: Vec<ImageUpload>,
    ) -> AppResult<StoredBatch>;

    /// Produce a retrieval URL for `reference` valid for `ttl`.
    async fn signed_url(&self, reference: &str, ttl: Duration) -> AppResult<String>;

    /// Read an object through a URL previously issued by [`signed_url`].
    ///
    /// Only providers that serve objects themselves implement this; remote
    /// object stores hand out URLs pointing at their own endpoint.
    ///
    /// [`signed_url`]: ImageStorage::signed_url
    async fn open_signed(&self, reference: &str, expires: i64, signature: &str) -> AppResult<Bytes> {
        let _ = (reference, expires, signature);
        Err(AppError::not_found(format!(
            "The {} provider does not serve objects directly",
            self.provider_type()
        )))
    }
}

/// Folder-like prefix holding the raw images of one inspection.
pub fn raw_batch_prefix(inspection_id: &InspectionId) -> String {
    format!("inspections/{inspection_id}/raw")
}

/// Object key for one uploaded image, unique within the batch prefix.
pub fn raw_object_key(inspection_id: &InspectionId, file_name: &str) -> String {
    let safe_name: String = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe_name = if safe_name.is_empty() {
        "image".to_string()
    } else {
        safe_name
    };
    format!(
        "{}/{}-{}",
        raw_batch_prefix(inspection_id),
        uuid::Uuid::new_v4(),
        safe_name
    )
}

/// Whether a stored reference is already an absolute external URL.
pub fn is_external_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}
