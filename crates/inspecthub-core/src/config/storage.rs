//! Image storage configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use: `"local"`, `"s3"`, or `"noop"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Lifetime of retrieval URLs handed out to callers.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
    /// Maximum request body size for image uploads (default 200 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            signed_url_ttl_seconds: default_signed_url_ttl(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Checks that the selected provider has what it needs.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.provider.as_str() {
            "local" => {
                if self.local.url_signing_key.is_empty() {
                    return Err(AppError::configuration(
                        "storage.local.url_signing_key is required for the local provider",
                    ));
                }
                Ok(())
            }
            "s3" => {
                if self.s3.bucket.is_empty() {
                    return Err(AppError::configuration(
                        "storage.s3.bucket is required for the s3 provider",
                    ));
                }
                Ok(())
            }
            "noop" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown storage provider '{other}'. Expected one of: local, s3, noop"
            ))),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL under which stored objects are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Key mixed into retrieval URL signatures.
    #[serde(default)]
    pub url_signing_key: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
            url_signing_key: String::new(),
        }
    }
}

impl std::fmt::Debug for LocalStorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorageConfig")
            .field("root_path", &self.root_path)
            .field("public_base_url", &self.public_base_url)
            .finish_non_exhaustive()
    }
}

/// S3-compatible object storage configuration.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO or Supabase).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

impl std::fmt::Debug for S3StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_signed_url_ttl() -> u64 {
    3600
}

fn default_max_upload() -> u64 {
    209_715_200 // 200 MB
}

fn default_local_root() -> String {
    "./data/storage".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8000/files".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
