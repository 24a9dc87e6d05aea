//! Seat layout and lease timing configuration.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Lease registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Row labels, in display order. Seat IDs are `<row><number>`.
    #[serde(default = "default_rows")]
    pub rows: Vec<String>,
    /// Number of seats in every row, numbered from 1.
    #[serde(default = "default_seats_per_row")]
    pub seats_per_row: u32,
    /// Lease time-to-live in milliseconds.
    #[serde(default = "default_lease_ttl")]
    pub lease_ttl_ms: u64,
    /// Period of the background expiration sweep in milliseconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_ms: u64,
}

impl RegistryConfig {
    /// Lease TTL as a [`Duration`].
    pub fn lease_ttl(&self) -> Duration {
        Duration::from_millis(self.lease_ttl_ms)
    }

    /// Sweep period as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    /// Rejects layouts and timings the registry cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.rows.is_empty() {
            return Err(AppError::configuration("registry.rows must not be empty"));
        }
        if self.seats_per_row == 0 {
            return Err(AppError::configuration(
                "registry.seats_per_row must be greater than zero",
            ));
        }
        if self.lease_ttl_ms == 0 {
            return Err(AppError::configuration(
                "registry.lease_ttl_ms must be greater than zero",
            ));
        }
        if self.sweep_interval_ms == 0 {
            return Err(AppError::configuration(
                "registry.sweep_interval_ms must be greater than zero",
            ));
        }

        let mut seen = HashSet::new();
        for row in &self.rows {
            if row.trim().is_empty() {
                return Err(AppError::configuration("registry.rows contains a blank label"));
            }
            if !seen.insert(row.as_str()) {
                return Err(AppError::configuration(format!(
                    "registry.rows contains duplicate label '{row}'"
                )));
            }
        }

        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seats_per_row: default_seats_per_row(),
            lease_ttl_ms: default_lease_ttl(),
            sweep_interval_ms: default_sweep_interval(),
        }
    }
}

fn default_rows() -> Vec<String> {
    ["A", "B", "C", "D", "E"]
        .iter()
        .map(|r| r.to_string())
        .collect()
}

fn default_seats_per_row() -> u32 {
    10
}

fn default_lease_ttl() -> u64 {
    60_000
}

fn default_sweep_interval() -> u64 {
    1_000
}
