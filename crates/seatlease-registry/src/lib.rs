//! # seatlease-registry
//!
//! The lease core of SeatLease: a fixed set of seats, each guarded by its
//! own mutex, moving through `Available -> Leased -> Committed` with
//! time-bounded leases that expire lazily on access and periodically in
//! the background.
//!
//! - [`seat`]: seat model, identifiers and layout
//! - [`lease`]: lease identifiers, the registry, and the sweeper task
//! - [`clock`]: injectable time source
//! - [`error`]: typed lease outcomes

pub mod clock;
pub mod error;
pub mod lease;
pub mod seat;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::LeaseError;
pub use lease::{
    AcquiredLease, LeaseId, LeaseRegistry, LeaseSweeper, SeatListing, SeatStatistics,
    SweeperHandle,
};
pub use seat::{SeatId, SeatLayout, SeatSnapshot, SeatStatus};
