//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use seatlease_core::config::AppConfig;
use seatlease_registry::LeaseRegistry;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or `Copy` for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The lease registry
    pub registry: Arc<LeaseRegistry>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state from an already-built registry.
    pub fn new(config: Arc<AppConfig>, registry: Arc<LeaseRegistry>) -> Self {
        Self {
            config,
            registry,
            started_at: Instant::now(),
        }
    }
}
