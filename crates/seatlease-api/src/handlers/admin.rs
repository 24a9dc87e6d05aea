//! Administrative handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, ResetResponse};
use crate::state::AppState;

/// POST /api/admin/reset
pub async fn reset_registry(State(state): State<AppState>) -> Json<ApiResponse<ResetResponse>> {
    state.registry.reset().await;
    tracing::warn!("Registry reset via admin endpoint");

    let statistics = state.registry.statistics().await;
    Json(ApiResponse::ok(ResetResponse {
        message: format!("All {} seats reset to available", statistics.total),
        statistics,
    }))
}
