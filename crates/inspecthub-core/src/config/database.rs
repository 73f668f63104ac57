//! Persistence configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `url` prefix selecting the in-process store instead of PostgreSQL.
pub const MEMORY_DATABASE_PREFIX: &str = "memory:";

/// Where bookings are persisted and how the PostgreSQL pool is sized.
///
/// Each request holds a connection only for one short transaction (a row
/// lock on a single inspection at most), so the pool stays small and gives
/// up on acquisition quickly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL, or `memory:` for the in-process store.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a free connection before failing the request.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Whether the in-process store was requested.
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_DATABASE_PREFIX)
    }

    /// Validate the persistence section.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must be set"));
        }
        if self.is_memory() {
            return Ok(());
        }
        if self.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be at least 1",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::configuration(
                "database.min_connections must not exceed database.max_connections",
            ));
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    16
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}
