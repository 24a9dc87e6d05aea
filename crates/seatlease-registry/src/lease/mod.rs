//! Lease issuing, validation, and expiration.
//!
//! - [`id`]: opaque lease tokens
//! - [`registry`]: the per-seat locked registry
//! - [`sweeper`]: the periodic background expiration task

pub mod id;
pub mod registry;
pub mod sweeper;

pub use id::LeaseId;
pub use registry::{AcquiredLease, LeaseRegistry, SeatListing, SeatStatistics};
pub use sweeper::{LeaseSweeper, SweeperHandle};
