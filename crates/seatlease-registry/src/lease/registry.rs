//! The lease registry: authoritative seat state behind per-seat mutexes.
//!
//! Locking discipline:
//! - the seat table sits behind a `RwLock`; every operation takes the shared
//!   side, only [`LeaseRegistry::reset`] takes the exclusive side;
//! - each seat has its own `Mutex`, so operations on different seats never
//!   wait on each other and operations on the same seat are serialized;
//! - no call holds more than one seat lock at a time;
//! - guards are dropped on every return path, including errors.
//!
//! Each operation applies lazy expiration to the seat it touches before
//! deciding, so correctness never depends on the background sweeper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info};

use seatlease_core::config::RegistryConfig;

use crate::clock::{Clock, SystemClock};
use crate::error::LeaseError;
use crate::seat::{Lease, Seat, SeatId, SeatLayout, SeatSnapshot, SeatStatus};

use super::id::LeaseId;

/// Result of a successful `acquire`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquiredLease {
    /// Token the holder must present to commit or release.
    pub lease_id: LeaseId,
    /// When the lease lapses.
    pub lease_expires_at: DateTime<Utc>,
    /// Seat state right after the lease was issued.
    pub seat: SeatSnapshot,
}

/// Seat counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatStatistics {
    /// All seats in the layout.
    pub total: usize,
    /// Seats free to lease.
    pub available: usize,
    /// Seats under an unexpired lease.
    pub leased: usize,
    /// Committed seats.
    pub committed: usize,
}

impl SeatStatistics {
    fn record(&mut self, status: SeatStatus) {
        self.total += 1;
        match status {
            SeatStatus::Available => self.available += 1,
            SeatStatus::Leased => self.leased += 1,
            SeatStatus::Committed => self.committed += 1,
        }
    }
}

/// Every seat plus aggregate counts, in layout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatListing {
    /// Seat snapshots, row by row.
    pub seats: Vec<SeatSnapshot>,
    /// Counts per state over `seats`.
    pub statistics: SeatStatistics,
}

/// Seats in layout order, each behind its own lock, plus an id index.
#[derive(Debug)]
struct SeatTable {
    seats: Vec<Mutex<Seat>>,
    index: HashMap<SeatId, usize>,
}

impl SeatTable {
    fn build(layout: &SeatLayout) -> Self {
        let mut seats = Vec::with_capacity(layout.len());
        let mut index = HashMap::with_capacity(layout.len());

        for (position, seat_id) in layout.seat_ids().enumerate() {
            index.insert(seat_id.clone(), position);
            seats.push(Mutex::new(Seat::new(seat_id)));
        }

        Self { seats, index }
    }

    async fn lock(&self, seat_id: &str) -> Result<MutexGuard<'_, Seat>, LeaseError> {
        let slot = self
            .index
            .get(seat_id)
            .and_then(|&position| self.seats.get(position))
            .ok_or_else(|| LeaseError::NotFound {
                seat_id: seat_id.to_string(),
            })?;

        Ok(slot.lock().await)
    }
}

/// Owns the seat set and implements every lease transition.
///
/// Construct once at startup and share as `Arc<LeaseRegistry>`.
pub struct LeaseRegistry {
    layout: SeatLayout,
    lease_ttl: Duration,
    clock: Arc<dyn Clock>,
    table: RwLock<SeatTable>,
}

impl std::fmt::Debug for LeaseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseRegistry")
            .field("seats", &self.layout.len())
            .field("lease_ttl", &self.lease_ttl)
            .field("clock", &self.clock)
            .finish()
    }
}

impl LeaseRegistry {
    /// Creates a registry with every seat of `layout` available.
    pub fn new(layout: SeatLayout, lease_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let table = SeatTable::build(&layout);

        info!(
            seats = layout.len(),
            rows = layout.rows().len(),
            lease_ttl_ms = lease_ttl.as_millis() as u64,
            "Lease registry initialized"
        );

        Self {
            layout,
            lease_ttl,
            clock,
            table: RwLock::new(table),
        }
    }

    /// Creates a wall-clock registry from the `[registry]` config section.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(
            SeatLayout::from_config(config),
            config.lease_ttl(),
            Arc::new(SystemClock),
        )
    }

    /// The layout seats were built from.
    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    /// Lease time-to-live.
    pub fn lease_ttl(&self) -> Duration {
        self.lease_ttl
    }

    fn ttl_delta(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.lease_ttl.as_millis().min(i64::MAX as u128) as i64)
    }

    /// Leases an available seat to `actor_id`.
    pub async fn acquire(
        &self,
        seat_id: &str,
        actor_id: &str,
    ) -> Result<AcquiredLease, LeaseError> {
        let table = self.table.read().await;
        let mut seat = table.lock(seat_id).await?;
        let now = self.clock.now();
        reclaim_expired(&mut seat, now);

        match seat.acquire(actor_id, now, self.ttl_delta(), LeaseId::generate) {
            Ok(lease) => {
                let lease_id = lease.id;
                let lease_expires_at = lease.expires_at;

                info!(
                    seat_id = %seat_id,
                    actor_id = %actor_id,
                    lease_id = %lease_id,
                    expires_at = %lease_expires_at,
                    "Lease issued"
                );

                Ok(AcquiredLease {
                    lease_id,
                    lease_expires_at,
                    seat: seat.snapshot(),
                })
            }
            Err(err) => {
                debug!(seat_id = %seat_id, actor_id = %actor_id, error = %err, "Lease refused");
                Err(err)
            }
        }
    }

    /// Turns the caller's valid, unexpired lease into a permanent commit.
    pub async fn commit(
        &self,
        seat_id: &str,
        actor_id: &str,
        lease_id: &LeaseId,
    ) -> Result<SeatSnapshot, LeaseError> {
        let table = self.table.read().await;
        let mut seat = table.lock(seat_id).await?;
        let now = self.clock.now();

        let lapsed = reclaim_expired(&mut seat, now);

        match seat.commit_after_expiry(lapsed.as_ref(), actor_id, lease_id, now) {
            Ok(()) => {
                info!(
                    seat_id = %seat_id,
                    actor_id = %actor_id,
                    lease_id = %lease_id,
                    "Seat committed"
                );
                Ok(seat.snapshot())
            }
            Err(err @ LeaseError::LeaseExpired { .. }) => {
                info!(
                    seat_id = %seat_id,
                    actor_id = %actor_id,
                    lease_id = %lease_id,
                    "Commit refused, lease expired; seat reclaimed"
                );
                Err(err)
            }
            Err(err) => {
                debug!(seat_id = %seat_id, actor_id = %actor_id, error = %err, "Commit refused");
                Err(err)
            }
        }
    }

    /// Gives the caller's lease back, making the seat available again.
    pub async fn release(
        &self,
        seat_id: &str,
        actor_id: &str,
        lease_id: &LeaseId,
    ) -> Result<SeatSnapshot, LeaseError> {
        let table = self.table.read().await;
        let mut seat = table.lock(seat_id).await?;
        let now = self.clock.now();
        reclaim_expired(&mut seat, now);

        match seat.release(actor_id, lease_id, now) {
            Ok(lease) => {
                info!(
                    seat_id = %seat_id,
                    actor_id = %actor_id,
                    lease_id = %lease.id,
                    "Lease released"
                );
                Ok(seat.snapshot())
            }
            Err(err) => {
                debug!(seat_id = %seat_id, actor_id = %actor_id, error = %err, "Release refused");
                Err(err)
            }
        }
    }

    /// Snapshot of one seat, after reclaiming its lease if it lapsed.
    pub async fn get(&self, seat_id: &str) -> Result<SeatSnapshot, LeaseError> {
        let table = self.table.read().await;
        let mut seat = table.lock(seat_id).await?;
        reclaim_expired(&mut seat, self.clock.now());
        Ok(seat.snapshot())
    }

    /// Every seat in layout order with aggregate counts.
    ///
    /// Each seat is swept under its own lock just before it is read.
    pub async fn list(&self) -> SeatListing {
        let table = self.table.read().await;
        let mut seats = Vec::with_capacity(table.seats.len());
        let mut statistics = SeatStatistics::default();

        for slot in &table.seats {
            let mut seat = slot.lock().await;
            reclaim_expired(&mut seat, self.clock.now());
            statistics.record(seat.status());
            seats.push(seat.snapshot());
        }

        SeatListing { seats, statistics }
    }

    /// Seat counts per state, after sweeping every seat.
    pub async fn statistics(&self) -> SeatStatistics {
        let table = self.table.read().await;
        let mut statistics = SeatStatistics::default();

        for slot in &table.seats {
            let mut seat = slot.lock().await;
            reclaim_expired(&mut seat, self.clock.now());
            statistics.record(seat.status());
        }

        statistics
    }

    /// Reclaims every lapsed lease; returns how many seats were freed.
    pub async fn sweep_expired(&self) -> usize {
        let table = self.table.read().await;
        let mut reclaimed = 0;

        for slot in &table.seats {
            let mut seat = slot.lock().await;
            if reclaim_expired(&mut seat, self.clock.now()).is_some() {
                reclaimed += 1;
            }
        }

        if reclaimed > 0 {
            debug!(reclaimed, "Sweep reclaimed expired leases");
        }

        reclaimed
    }

    /// Replaces the whole seat set with fresh, available seats.
    ///
    /// Waits for in-flight operations to finish, then discards every lease
    /// and commit.
    pub async fn reset(&self) {
        let mut table = self.table.write().await;
        *table = SeatTable::build(&self.layout);

        info!(seats = self.layout.len(), "Lease registry reset");
    }
}

fn reclaim_expired(seat: &mut Seat, now: DateTime<Utc>) -> Option<Lease> {
    let lease = seat.expire_if_due(now)?;
    info!(
        seat_id = %seat.id(),
        holder = %lease.holder,
        lease_id = %lease.id,
        expired_at = %lease.expires_at,
        "Expired lease reclaimed"
    );
    Some(lease)
}
