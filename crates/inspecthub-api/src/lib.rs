//! # inspecthub-api
//!
//! HTTP API layer for InspectHub built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging, tracing),
//! the bearer-token extractor, DTOs, and the mapping from domain errors to
//! HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
