//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/seats/{seat_id}/lease`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcquireRequest {
    /// Actor asking for the lease.
    #[validate(length(min = 1, max = 128, message = "actor_id is required (max 128 characters)"))]
    pub actor_id: String,
}

/// Body of the commit and release endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeaseRequest {
    /// Actor presenting the lease.
    #[validate(length(min = 1, max = 128, message = "actor_id is required (max 128 characters)"))]
    pub actor_id: String,
    /// Lease id returned by the acquire call.
    #[validate(length(min = 1, message = "lease_id is required"))]
    pub lease_id: String,
}
