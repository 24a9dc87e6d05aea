//! Fixed seat layout: row labels times seats per row.

use seatlease_core::config::RegistryConfig;

use super::model::SeatId;

/// The seat identifier set a registry is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLayout {
    rows: Vec<String>,
    seats_per_row: u32,
}

impl SeatLayout {
    /// Layout with the given row labels and seats per row.
    pub fn new<I, S>(rows: I, seats_per_row: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            seats_per_row,
        }
    }

    /// Layout described by the registry configuration section.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.rows.iter().cloned(), config.seats_per_row)
    }

    /// Row labels in display order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Seats in each row.
    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    /// Total number of seats.
    pub fn len(&self) -> usize {
        self.rows.len() * self.seats_per_row as usize
    }

    /// Whether the layout has no seats.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every seat identifier, row by row, numbered from 1.
    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| (1..=self.seats_per_row).map(move |n| SeatId::new(row, n)))
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}
