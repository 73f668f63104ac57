//! Typed path parameter helpers.

use std::str::FromStr;

use inspecthub_core::error::AppError;

/// Parses an identifier from a path segment.
///
/// A malformed id is a validation error rather than axum's plain-text
/// rejection, so every failure shares the JSON error body.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid identifier: {s}")))
}
