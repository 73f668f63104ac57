//! Auth handlers: register, login, me.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use inspecthub_service::Registration;

use crate::dto::request::{LoginRequest, RegisterRequest, validated};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let req = validated(body)?;
    let user = state
        .account_service
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let req = validated(body)?;
    let outcome = state
        .account_service
        .login(&req.email, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
