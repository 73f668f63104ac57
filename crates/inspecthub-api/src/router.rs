//! Route definitions for the InspectHub HTTP API.
//!
//! Resource routes are mounted under `/api`; signed file links are served
//! from `/files`.

use axum::Router;
use axum::routing::{get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the route table, without middleware or state.
pub fn build_router() -> Router<AppState> {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(inspection_routes())
        .merge(report_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .route("/files/{*reference}", get(handlers::files::download_signed))
}

/// Auth endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Inspection lifecycle
fn inspection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/inspections",
            post(handlers::inspection::create_inspection)
                .get(handlers::inspection::list_inspections),
        )
        .route("/inspections/{id}", get(handlers::inspection::get_inspection))
        .route(
            "/inspections/{id}/assign",
            patch(handlers::inspection::assign_inspection),
        )
        .route(
            "/inspections/{id}/status",
            patch(handlers::inspection::update_status),
        )
        .route(
            "/inspections/{id}/upload",
            post(handlers::inspection::upload_images),
        )
}

/// Reports and customer analytics
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(handlers::report::create_report))
        .route(
            "/reports/customer/all",
            get(handlers::report::list_customer_reports),
        )
        .route("/reports/analytics/me", get(handlers::report::my_analytics))
        .route("/reports/{inspection_id}", get(handlers::report::get_report))
}
