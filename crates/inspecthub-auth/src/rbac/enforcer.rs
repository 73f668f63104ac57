//! The access guard: token → identity → authorized identity.

use tracing::debug;

use inspecthub_core::error::AppError;
use inspecthub_entity::user::UserRole;

use super::policies::Operation;
use crate::identity::Identity;
use crate::jwt::JwtDecoder;

/// Authenticates bearer tokens and checks role membership.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    decoder: JwtDecoder,
}

impl AccessGuard {
    /// Creates a guard backed by the given token decoder.
    pub fn new(decoder: JwtDecoder) -> Self {
        Self { decoder }
    }

    /// Turns a presented token into an identity, or `Unauthenticated`.
    pub fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        self.decoder.verify(token).map(Identity::from)
    }
}

fn authorize_roles(identity: &Identity, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        debug!(user_id = %identity.user_id, role = %identity.role, "Role not permitted");
        Err(AppError::forbidden(format!(
            "Role '{}' is not permitted to perform this action",
            identity.role
        )))
    }
}

/// Checks the identity against an operation's declared role set, or `Forbidden`.
pub fn require(identity: &Identity, operation: Operation) -> Result<(), AppError> {
    authorize_roles(identity, operation.allowed_roles())
}
