//! # inspecthub-auth
//!
//! Authentication and authorization for InspectHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: signed, time-bounded session tokens (HS256)
//! - `rbac`: per-operation role policies and the access guard that turns a
//!   bearer token into an authorized [`Identity`]

pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use identity::Identity;
pub use jwt::{IssuedToken, JwtDecoder, JwtEncoder, SessionClaims};
pub use password::PasswordHasher;
pub use rbac::{AccessGuard, Operation};
