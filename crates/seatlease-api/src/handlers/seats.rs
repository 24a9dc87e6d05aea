//! Seat listing and lease lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};

use seatlease_registry::{AcquiredLease, SeatListing, SeatSnapshot, SeatStatistics};

use crate::dto::request::{AcquireRequest, LeaseRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_lease_id, require_actor};
use crate::state::AppState;

/// GET /api/seats
pub async fn list_seats(State(state): State<AppState>) -> Json<ApiResponse<SeatListing>> {
    Json(ApiResponse::ok(state.registry.list().await))
}

/// GET /api/seats/{seat_id}
pub async fn get_seat(
    State(state): State<AppState>,
    Path(seat_id): Path<String>,
) -> Result<Json<ApiResponse<SeatSnapshot>>, ApiError> {
    let seat = state.registry.get(&seat_id).await?;
    Ok(Json(ApiResponse::ok(seat)))
}

/// GET /api/stats
pub async fn statistics(State(state): State<AppState>) -> Json<ApiResponse<SeatStatistics>> {
    Json(ApiResponse::ok(state.registry.statistics().await))
}

/// POST /api/seats/{seat_id}/lease
pub async fn acquire_seat(
    State(state): State<AppState>,
    Path(seat_id): Path<String>,
    ValidatedJson(req): ValidatedJson<AcquireRequest>,
) -> Result<Json<ApiResponse<AcquiredLease>>, ApiError> {
    let actor_id = require_actor(&req.actor_id)?;
    let lease = state.registry.acquire(&seat_id, actor_id).await?;
    Ok(Json(ApiResponse::ok(lease)))
}

/// POST /api/seats/{seat_id}/commit
pub async fn commit_seat(
    State(state): State<AppState>,
    Path(seat_id): Path<String>,
    ValidatedJson(req): ValidatedJson<LeaseRequest>,
) -> Result<Json<ApiResponse<SeatSnapshot>>, ApiError> {
    let actor_id = require_actor(&req.actor_id)?;
    let lease_id = parse_lease_id(&req.lease_id)?;
    let seat = state.registry.commit(&seat_id, actor_id, &lease_id).await?;
    Ok(Json(ApiResponse::ok(seat)))
}

/// POST /api/seats/{seat_id}/release
pub async fn release_seat(
    State(state): State<AppState>,
    Path(seat_id): Path<String>,
    ValidatedJson(req): ValidatedJson<LeaseRequest>,
) -> Result<Json<ApiResponse<SeatSnapshot>>, ApiError> {
    let actor_id = require_actor(&req.actor_id)?;
    let lease_id = parse_lease_id(&req.lease_id)?;
    let seat = state.registry.release(&seat_id, actor_id, &lease_id).await?;
    Ok(Json(ApiResponse::ok(seat)))
}
