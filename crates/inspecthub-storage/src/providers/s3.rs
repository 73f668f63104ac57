//! S3-compatible object storage provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info, warn};

use inspecthub_core::config::S3StorageConfig;
use inspecthub_core::error::{AppError, ErrorKind};
use inspecthub_core::result::AppResult;
use inspecthub_core::traits::storage::{
    ImageStorage, ImageUpload, StoredBatch, raw_batch_prefix, raw_object_key,
};
use inspecthub_core::types::InspectionId;

/// S3-compatible storage provider.
#[derive(Debug, Clone)]
pub struct S3ImageStorage {
    client: Client,
    bucket: String,
}

impl S3ImageStorage {
    /// Create a new S3 storage provider.
    ///
    /// Static keys are used when configured; otherwise the default AWS
    /// credential chain applies. A custom endpoint (MinIO, Supabase, ...)
    /// switches to path-style addressing.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 image storage"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "inspecthub-config",
            ));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if !config.endpoint.is_empty() {
            builder = builder
                .endpoint_url(config.endpoint.clone())
                .force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl ImageStorage for S3ImageStorage {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(bucket = %self.bucket, error = %e, "S3 health check failed");
                Ok(false)
            }
        }
    }

    async fn put_batch(
        &self,
        inspection_id: &InspectionId,
        images: Vec<ImageUpload>,
    ) -> AppResult<StoredBatch> {
        let mut objects = Vec::with_capacity(images.len());
        for image in images {
            let key = raw_object_key(inspection_id, &image.file_name);
            let size = image.data.len();
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(&key)
                .set_content_type(image.content_type)
                .body(ByteStream::from(image.data))
                .send()
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to upload object: {key}"),
                        e,
                    )
                })?;
            debug!(key = %key, bytes = size, "Uploaded image");
            objects.push(key);
        }

        Ok(StoredBatch {
            reference: raw_batch_prefix(inspection_id),
            objects,
        })
    }

    async fn signed_url(&self, reference: &str, ttl: Duration) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigned URL lifetime", e)
        })?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(reference.trim_start_matches('/'))
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign object: {reference}"),
                    e,
                )
            })?;

        Ok(request.uri().to_string())
    }
}
