//! InspectHub Server: drone inspection booking API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use inspecthub_api::{AppState, build_app};
use inspecthub_core::config::AppConfig;
use inspecthub_core::error::AppError;
use inspecthub_core::traits::clock::{Clock, SystemClock};
use inspecthub_database::connection::redact_url;
use inspecthub_database::{DatabasePool, MemoryStore, Stores};

#[tokio::main]
async fn main() {
    let env = std::env::var("INSPECTHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, env: &str) -> Result<(), AppError> {
    tracing::info!(env, "Starting InspectHub v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // ── Step 1: Persistence ──────────────────────────────────────
    let database_url = redact_url(&config.database.url);
    let (stores, db_pool) = if config.database.is_memory() {
        tracing::warn!(url = %database_url, "Using the in-memory store; data is lost on shutdown");
        (Stores::memory(MemoryStore::new()), None)
    } else {
        tracing::info!("Connecting to database...");
        let pool = DatabasePool::connect(&config.database).await?;

        tracing::info!("Running database migrations...");
        inspecthub_database::migration::run_migrations(pool.pool()).await?;
        tracing::info!("Database migrations complete");

        (Stores::postgres(&pool), Some(pool))
    };

    // ── Step 2: Image storage ────────────────────────────────────
    let storage = inspecthub_storage::build_storage(&config.storage, Arc::clone(&clock)).await?;

    // ── Step 3: Services + router ────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, stores, storage, clock);
    let app = build_app(state);

    // ── Step 4: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("InspectHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Release resources ────────────────────────────────
    if let Some(pool) = db_pool
        && tokio::time::timeout(grace, pool.close()).await.is_err()
    {
        tracing::warn!("Database pool did not close within the shutdown grace period");
    }

    tracing::info!("InspectHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
