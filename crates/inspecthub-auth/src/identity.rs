//! The authenticated caller.

use serde::{Deserialize, Serialize};

use inspecthub_core::types::UserId;
use inspecthub_entity::user::UserRole;

use crate::jwt::SessionClaims;

/// Who is making a request, as established by a verified session token.
///
/// Passed explicitly into every service call that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The account id (token subject).
    pub user_id: UserId,
    /// Email at the time the token was issued.
    pub email: String,
    /// The caller's single role.
    pub role: UserRole,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
