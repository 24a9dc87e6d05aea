//! Response DTOs.

use serde::{Deserialize, Serialize};

use seatlease_registry::SeatStatistics;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
    /// Seats managed by the registry.
    pub seats: usize,
}

/// Confirmation returned by `POST /api/admin/reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Counts after the reset; every seat is available.
    pub statistics: SeatStatistics,
}
