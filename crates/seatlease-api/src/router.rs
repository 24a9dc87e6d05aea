//! Route definitions for the SeatLease HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to every handler via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use seatlease_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(seat_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Seat reads and the lease lifecycle
fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/seats", get(handlers::seats::list_seats))
        .route("/seats/{seat_id}", get(handlers::seats::get_seat))
        .route("/seats/{seat_id}/lease", post(handlers::seats::acquire_seat))
        .route("/seats/{seat_id}/commit", post(handlers::seats::commit_seat))
        .route("/seats/{seat_id}/release", post(handlers::seats::release_seat))
        .route("/stats", get(handlers::seats::statistics))
}

/// Administrative endpoints
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/reset", post(handlers::admin::reset_registry))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn unknown_route() -> ApiError {
    AppError::not_found("No such route").into()
}
