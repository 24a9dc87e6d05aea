//! # seatlease-api
//!
//! HTTP API layer for SeatLease built on Axum.
//!
//! A thin shell over [`seatlease_registry::LeaseRegistry`]: it validates
//! input, calls the registry, and maps typed lease outcomes onto status
//! codes and JSON bodies.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
