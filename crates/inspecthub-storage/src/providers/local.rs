//! Local filesystem storage provider.
//!
//! Objects live under `root_path`, keyed by their storage reference.
//! Retrieval URLs have the form
//! `{public_base_url}/{reference}?expires={unix}&signature={sig}` where the
//! signature is the URL-safe base64 HMAC-SHA256, keyed with the signing key,
//! over the reference and the expiry.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bytes::Bytes;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::fs;
use tracing::{debug, info};

use inspecthub_core::config::LocalStorageConfig;
use inspecthub_core::error::{AppError, ErrorKind};
use inspecthub_core::result::AppResult;
use inspecthub_core::traits::clock::Clock;
use inspecthub_core::traits::storage::{
    ImageStorage, ImageUpload, StoredBatch, raw_batch_prefix, raw_object_key,
};
use inspecthub_core::types::InspectionId;

type HmacSha256 = Hmac<Sha256>;

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    /// Root directory for all stored files.
    root: PathBuf,
    /// Base URL under which the API serves stored objects.
    public_base_url: String,
    /// Secret mixed into every URL signature.
    signing_key: String,
    clock: Arc<dyn Clock>,
}

impl LocalImageStorage {
    /// Create a new local storage provider, creating the root if needed.
    pub async fn new(config: &LocalStorageConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;

        info!(root = %root.display(), "Local image storage ready");
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            signing_key: config.url_signing_key.clone(),
            clock,
        })
    }

    /// Resolve a reference to a path inside the root.
    ///
    /// References containing `..` or absolute components are rejected.
    fn resolve(&self, reference: &str) -> AppResult<PathBuf> {
        let relative = Path::new(reference.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || reference.is_empty() {
            return Err(AppError::validation(format!(
                "Invalid storage reference: {reference}"
            )));
        }
        Ok(self.root.join(relative))
    }

    fn mac(&self, reference: &str, expires: i64) -> AppResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.signing_key.as_bytes())
            .map_err(|e| AppError::internal(format!("Invalid URL signing key: {e}")))?;
        mac.update(reference.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }

    fn signature(&self, reference: &str, expires: i64) -> AppResult<String> {
        let tag = self.mac(reference, expires)?.finalize().into_bytes();
        Ok(URL_SAFE_NO_PAD.encode(tag))
    }

    /// Check a signature and expiry produced by [`ImageStorage::signed_url`].
    pub fn verify_signed_url(&self, reference: &str, expires: i64, signature: &str) -> bool {
        if self.clock.now().timestamp() >= expires {
            return false;
        }
        let Ok(tag) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        match self.mac(reference, expires) {
            Ok(mac) => mac.verify_slice(&tag).is_ok(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn put_batch(
        &self,
        inspection_id: &InspectionId,
        images: Vec<ImageUpload>,
    ) -> AppResult<StoredBatch> {
        let prefix = raw_batch_prefix(inspection_id);
        let dir = self.resolve(&prefix)?;
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {}", dir.display()),
                e,
            )
        })?;

        let mut objects = Vec::with_capacity(images.len());
        for image in images {
            let key = raw_object_key(inspection_id, &image.file_name);
            let path = self.resolve(&key)?;
            fs::write(&path, &image.data).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, format!("Failed to write file: {key}"), e)
            })?;
            debug!(key = %key, bytes = image.data.len(), "Wrote image");
            objects.push(key);
        }

        Ok(StoredBatch {
            reference: prefix,
            objects,
        })
    }

    async fn signed_url(&self, reference: &str, ttl: Duration) -> AppResult<String> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| AppError::validation("Signed URL lifetime is out of range"))?;
        let expires = (self.clock.now() + ttl).timestamp();
        let reference = reference.trim_start_matches('/');
        Ok(format!(
            "{}/{}?expires={}&signature={}",
            self.public_base_url,
            reference,
            expires,
            self.signature(reference, expires)?
        ))
    }

    async fn open_signed(&self, reference: &str, expires: i64, signature: &str) -> AppResult<Bytes> {
        let reference = reference.trim_start_matches('/');
        if !self.verify_signed_url(reference, expires, signature) {
            return Err(AppError::forbidden("Invalid or expired download link"));
        }

        let path = self.resolve(reference)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {reference}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {reference}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }
}
