//! Selects and constructs the configured storage provider.

use std::sync::Arc;

use tracing::info;

use inspecthub_core::config::StorageConfig;
use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::traits::clock::Clock;
use inspecthub_core::traits::storage::ImageStorage;

use crate::providers::{LocalImageStorage, NoopImageStorage};

/// Build the provider named by `config.provider`.
pub async fn build_storage(
    config: &StorageConfig,
    clock: Arc<dyn Clock>,
) -> AppResult<Arc<dyn ImageStorage>> {
    config.validate()?;

    let storage: Arc<dyn ImageStorage> = match config.provider.as_str() {
        "local" => Arc::new(LocalImageStorage::new(&config.local, clock).await?),
        "noop" => Arc::new(NoopImageStorage::new()),
        #[cfg(feature = "s3")]
        "s3" => Arc::new(crate::providers::S3ImageStorage::new(&config.s3).await?),
        #[cfg(not(feature = "s3"))]
        "s3" => {
            return Err(AppError::configuration(
                "The s3 storage provider requires building with the `s3` feature",
            ));
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider '{other}'"
            )));
        }
    };

    info!(provider = storage.provider_type(), "Image storage selected");
    Ok(storage)
}
