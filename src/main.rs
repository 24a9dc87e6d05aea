//! SeatLease Server
//!
//! Main entry point that wires the registry, sweeper and HTTP API together.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use seatlease_api::AppState;
use seatlease_core::config::AppConfig;
use seatlease_core::error::AppError;
use seatlease_registry::{LeaseRegistry, LeaseSweeper};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load layered configuration for the active environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SEATLEASE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SeatLease v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Seat registry ────────────────────────────────────
    let registry = Arc::new(LeaseRegistry::from_config(&config.registry));
    tracing::info!(
        rows = registry.layout().rows().len(),
        seats_per_row = registry.layout().seats_per_row(),
        lease_ttl = ?registry.lease_ttl(),
        "Seat registry initialized"
    );

    // ── Step 2: Background lease sweeper ─────────────────────────
    let sweeper = LeaseSweeper::spawn(Arc::clone(&registry), config.registry.sweep_interval());

    // ── Step 3: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = seatlease_api::build_app(AppState::new(Arc::new(config), registry));

    seatlease_api::serve(listener, app, async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await?;

    // ── Step 4: Stop background tasks ────────────────────────────
    match tokio::time::timeout(grace, sweeper.shutdown()).await {
        Ok(Ok(reclaimed)) => tracing::info!(reclaimed, "Lease sweeper stopped"),
        Ok(Err(e)) => tracing::warn!("Lease sweeper did not stop cleanly: {}", e),
        Err(_) => tracing::warn!("Lease sweeper did not stop within {:?}", grace),
    }

    tracing::info!("SeatLease server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
