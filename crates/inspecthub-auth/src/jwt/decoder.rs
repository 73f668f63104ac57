//! Session token validation.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use inspecthub_core::config::AuthConfig;
use inspecthub_core::error::AppError;
use inspecthub_core::traits::clock::Clock;

use super::INVALID_TOKEN_MESSAGE;
use super::claims::SessionClaims;

/// Validates session tokens against the signing secret and the clock.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the injected clock below, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Verifies signature, structure, and expiry.
    ///
    /// Every failure yields the same `Unauthenticated` error; the cause is
    /// only visible in debug logs.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Session token rejected");
                AppError::unauthenticated(INVALID_TOKEN_MESSAGE)
            })?
            .claims;

        if claims.is_expired_at(self.clock.now()) {
            debug!(user_id = %claims.sub, exp = claims.exp, "Session token expired");
            return Err(AppError::unauthenticated(INVALID_TOKEN_MESSAGE));
        }

        Ok(claims)
    }
}
