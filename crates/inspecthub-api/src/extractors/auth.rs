//! `AuthUser` extractor: pulls the session token from the Authorization
//! header and resolves it to an [`Identity`].

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use inspecthub_auth::Identity;
use inspecthub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    /// Returns the inner `Identity`.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let identity = state.guard.authenticate(token)?;
        Ok(AuthUser(identity))
    }
}

/// The token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::unauthenticated(
            "Invalid Authorization header format",
        ));
    }
    Ok(token.trim())
}
