//! Session token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::SessionClaims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};

/// The single message every token failure is reported with.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired session token";
