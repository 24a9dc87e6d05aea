//! Seats: identity, lease state, and the fixed layout they are built from.

pub mod layout;
pub mod model;

pub use layout::SeatLayout;
pub use model::{Lease, Seat, SeatId, SeatSnapshot, SeatState, SeatStatus};
