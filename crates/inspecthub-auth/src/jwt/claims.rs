//! Claims carried by a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inspecthub_core::types::UserId;
use inspecthub_entity::user::UserRole;

/// JWT claims payload embedded in every session token.
///
/// All fields are required; a token missing any of them (in particular `sub`
/// or `role`) fails to decode and is rejected like a forged one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Email of the subject.
    pub email: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl SessionClaims {
    /// Whether the claims are no longer trusted at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
