//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted session token lifetime: 30 days.
pub const MAX_TOKEN_TTL_MINUTES: u64 = 30 * 24 * 60;

/// Authentication and session token configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    ///
    /// Deliberately has no default; a deployment must provide one.
    pub jwt_secret: String,
    /// Session token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
}

impl AuthConfig {
    /// Rejects short secrets and token lifetimes outside 1 minute to 30 days.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }
        if self.token_ttl_minutes == 0 || self.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

fn default_token_ttl() -> u64 {
    1440
}
