//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inspecthub_core::types::UserId;

use super::role::UserRole;

/// A registered customer or pilot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Human-readable display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash (PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Capability class of this account.
    pub role: UserRole,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address, already normalized.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}

impl CreateUser {
    /// Materializes the row that a store will insert.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: UserId::new(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            created_at: now,
        }
    }
}

/// Canonical form used for email uniqueness and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
