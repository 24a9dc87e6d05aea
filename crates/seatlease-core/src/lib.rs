//! # seatlease-core
//!
//! Core crate for SeatLease. Contains the configuration schemas and the
//! unified error system shared by the registry, the HTTP layer and the
//! server binary.
//!
//! This crate has **no** internal dependencies on other SeatLease crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
