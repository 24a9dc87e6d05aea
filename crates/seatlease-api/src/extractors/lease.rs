//! Helpers for the actor and lease fields of lease requests.

use seatlease_core::error::AppError;
use seatlease_registry::LeaseId;

/// Rejects blank actor identifiers; returns the trimmed value.
pub fn require_actor(actor_id: &str) -> Result<&str, AppError> {
    let trimmed = actor_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("actor_id must not be blank"));
    }
    Ok(trimmed)
}

/// Parses a lease id from a request body.
pub fn parse_lease_id(s: &str) -> Result<LeaseId, AppError> {
    s.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid lease_id: {s}")))
}
