//! Typed outcomes of lease operations.
//!
//! Every variant is an expected, recoverable result for the caller. None of
//! them reveals which actor holds a seat.

use chrono::{DateTime, Utc};
use thiserror::Error;

use seatlease_core::error::AppError;

use crate::seat::{SeatId, SeatStatus};

/// Why a lease operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaseError {
    /// The seat identifier is not part of the layout.
    #[error("seat {seat_id} does not exist")]
    NotFound {
        /// Requested seat.
        seat_id: String,
    },

    /// `acquire` on a seat that is not available.
    #[error("seat {seat_id} is already {state}")]
    Conflict {
        /// Requested seat.
        seat_id: SeatId,
        /// State the seat is in.
        state: SeatStatus,
    },

    /// `commit` or `release` on a seat that holds no lease.
    #[error("seat {seat_id} is not leased (currently {state})")]
    NotLeased {
        /// Requested seat.
        seat_id: SeatId,
        /// State the seat is in.
        state: SeatStatus,
    },

    /// `commit` by an actor other than the lease holder.
    #[error("seat {seat_id} is leased by another actor")]
    WrongHolder {
        /// Requested seat.
        seat_id: SeatId,
    },

    /// `commit` with a lease id that is not the active one.
    #[error("lease id does not match the active lease on seat {seat_id}")]
    InvalidLease {
        /// Requested seat.
        seat_id: SeatId,
    },

    /// `release` with the wrong actor or lease id.
    #[error("actor or lease id does not match the active lease on seat {seat_id}")]
    HolderMismatch {
        /// Requested seat.
        seat_id: SeatId,
    },

    /// `commit` on a lease whose TTL elapsed. The seat is available again.
    #[error("lease on seat {seat_id} expired at {expired_at}")]
    LeaseExpired {
        /// Requested seat.
        seat_id: SeatId,
        /// When the lease lapsed.
        expired_at: DateTime<Utc>,
    },
}

impl LeaseError {
    /// Machine-readable code for API bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "SEAT_NOT_FOUND",
            Self::Conflict { .. } => "SEAT_UNAVAILABLE",
            Self::NotLeased { .. } => "SEAT_NOT_LEASED",
            Self::WrongHolder { .. } => "WRONG_HOLDER",
            Self::InvalidLease { .. } => "INVALID_LEASE",
            Self::HolderMismatch { .. } => "HOLDER_MISMATCH",
            Self::LeaseExpired { .. } => "LEASE_EXPIRED",
        }
    }
}

impl From<LeaseError> for AppError {
    fn from(err: LeaseError) -> Self {
        let message = err.to_string();
        let code = err.code();

        match err {
            LeaseError::NotFound { seat_id } => AppError::not_found(message)
                .with_details(serde_json::json!({ "code": code, "seat_id": seat_id })),
            LeaseError::Conflict { seat_id, state } | LeaseError::NotLeased { seat_id, state } => {
                AppError::conflict(message).with_details(serde_json::json!({
                    "code": code,
                    "seat_id": seat_id,
                    "state": state,
                }))
            }
            LeaseError::WrongHolder { seat_id } | LeaseError::InvalidLease { seat_id } => {
                AppError::conflict(message)
                    .with_details(serde_json::json!({ "code": code, "seat_id": seat_id }))
            }
            LeaseError::HolderMismatch { seat_id } => AppError::forbidden(message)
                .with_details(serde_json::json!({ "code": code, "seat_id": seat_id })),
            LeaseError::LeaseExpired {
                seat_id,
                expired_at,
            } => AppError::gone(message).with_details(serde_json::json!({
                "code": code,
                "seat_id": seat_id,
                "expired_at": expired_at,
            })),
        }
    }
}
