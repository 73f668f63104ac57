//! Session token creation with configurable signing and TTL.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use inspecthub_core::config::AuthConfig;
use inspecthub_core::config::auth::MAX_TOKEN_TTL_MINUTES;
use inspecthub_core::error::AppError;
use inspecthub_core::traits::clock::Clock;
use inspecthub_core::types::UserId;
use inspecthub_entity::user::UserRole;

use super::claims::SessionClaims;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Default token lifetime.
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// A freshly issued token and what it asserts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// The signed claims.
    pub claims: SessionClaims,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::minutes(config.token_ttl_minutes.min(MAX_TOKEN_TTL_MINUTES) as i64),
            clock,
        }
    }

    /// Issues a token for a user with the configured lifetime.
    pub fn issue(&self, user_id: UserId, email: &str, role: UserRole) -> Result<IssuedToken, AppError> {
        self.issue_with_ttl(user_id, email, role, self.ttl)
    }

    /// Issues a token for a user that expires after `ttl`.
    pub fn issue_with_ttl(
        &self,
        user_id: UserId,
        email: &str,
        role: UserRole,
        ttl: Duration,
    ) -> Result<IssuedToken, AppError> {
        let now = self.clock.now();
        let expires_at = now + ttl;
        let claims = SessionClaims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = self.encode_claims(&claims)?;
        Ok(IssuedToken {
            token,
            expires_at,
            claims,
        })
    }

    /// Signs an arbitrary claims value.
    pub fn encode_claims(&self, claims: &SessionClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
