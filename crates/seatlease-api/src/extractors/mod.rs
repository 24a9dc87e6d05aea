//! Custom Axum extractors and input helpers.

pub mod json;
pub mod lease;

pub use json::ValidatedJson;
pub use lease::{parse_lease_id, require_actor};
