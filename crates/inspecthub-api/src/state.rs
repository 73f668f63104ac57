//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use inspecthub_auth::jwt::{JwtDecoder, JwtEncoder};
use inspecthub_auth::password::PasswordHasher;
use inspecthub_auth::rbac::AccessGuard;
use inspecthub_core::config::AppConfig;
use inspecthub_core::traits::clock::Clock;
use inspecthub_core::traits::storage::ImageStorage;
use inspecthub_database::Stores;
use inspecthub_service::{AccountService, AnalyticsService, InspectionService, ReportService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token verification and role checks
    pub guard: Arc<AccessGuard>,
    /// Image storage provider
    pub storage: Arc<dyn ImageStorage>,

    /// Register, login, profile
    pub account_service: Arc<AccountService>,
    /// Inspection lifecycle
    pub inspection_service: Arc<InspectionService>,
    /// Report filing and retrieval
    pub report_service: Arc<ReportService>,
    /// Customer analytics
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    /// Wires the auth components and services over the given stores.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        storage: Arc<dyn ImageStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let encoder = Arc::new(JwtEncoder::new(&config.auth, Arc::clone(&clock)));
        let decoder = JwtDecoder::new(&config.auth, Arc::clone(&clock));
        let url_ttl = Duration::from_secs(config.storage.signed_url_ttl_seconds);

        let account_service = AccountService::new(
            Arc::clone(&stores.users),
            Arc::new(PasswordHasher::new()),
            encoder,
            Arc::clone(&clock),
        );
        let inspection_service = InspectionService::new(
            Arc::clone(&stores.inspections),
            Arc::clone(&storage),
            Arc::clone(&clock),
        );
        let report_service = ReportService::new(
            Arc::clone(&stores.reports),
            Arc::clone(&stores.inspections),
            Arc::clone(&storage),
            clock,
            url_ttl,
        );
        let analytics_service = AnalyticsService::new(
            stores.inspections,
            config.analytics.cost_saved_per_inspection,
        );

        Self {
            config: Arc::new(config),
            guard: Arc::new(AccessGuard::new(decoder)),
            storage,
            account_service: Arc::new(account_service),
            inspection_service: Arc::new(inspection_service),
            report_service: Arc::new(report_service),
            analytics_service: Arc::new(analytics_service),
        }
    }
}
