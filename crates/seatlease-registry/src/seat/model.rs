//! Seat state and its transitions.
//!
//! A [`Seat`] owns its state exclusively; every transition takes `&mut self`,
//! so callers must hold the seat's lock to perform one. The lease fields
//! only exist inside [`SeatState::Leased`], which makes the "lease data
//! present iff leased" invariant structural.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::lease::LeaseId;

/// Stable identifier of a seat, e.g. `A5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Build an identifier from a row label and a 1-based seat number.
    pub fn new(row: &str, number: u32) -> Self {
        Self(format!("{row}{number}"))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for SeatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Coarse state label reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Free to be leased.
    Available,
    /// Held under a time-bounded lease.
    Leased,
    /// Permanently reserved.
    Committed,
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Leased => write!(f, "leased"),
            Self::Committed => write!(f, "committed"),
        }
    }
}

/// An active, time-bounded claim on a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    /// Token binding commit/release to this acquisition.
    pub id: LeaseId,
    /// Actor the lease was issued to.
    pub holder: String,
    /// When the lease was issued.
    pub issued_at: DateTime<Utc>,
    /// `issued_at + TTL`.
    pub expires_at: DateTime<Utc>,
}

impl Lease {
    /// A lease is still valid at its exact expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    fn is_held_by(&self, actor_id: &str, lease_id: &LeaseId) -> bool {
        self.holder == actor_id && self.id == *lease_id
    }
}

/// Full state of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeatState {
    /// No holder, no lease.
    #[default]
    Available,
    /// Leased to one actor until the lease expires.
    Leased(Lease),
    /// Committed by `holder`; terminal until a registry reset.
    Committed {
        /// Actor that committed.
        holder: String,
        /// When the commit happened.
        committed_at: DateTime<Utc>,
    },
}

impl SeatState {
    /// Coarse label for this state.
    pub fn status(&self) -> SeatStatus {
        match self {
            Self::Available => SeatStatus::Available,
            Self::Leased(_) => SeatStatus::Leased,
            Self::Committed { .. } => SeatStatus::Committed,
        }
    }
}

/// A seat and its current state.
#[derive(Debug, Clone)]
pub struct Seat {
    id: SeatId,
    state: SeatState,
}

impl Seat {
    /// A fresh, available seat.
    pub fn new(id: SeatId) -> Self {
        Self {
            id,
            state: SeatState::Available,
        }
    }

    /// Seat identifier.
    pub fn id(&self) -> &SeatId {
        &self.id
    }

    /// Current state.
    pub fn state(&self) -> &SeatState {
        &self.state
    }

    /// Current state label.
    pub fn status(&self) -> SeatStatus {
        self.state.status()
    }

    /// Reclaims the seat if its lease has lapsed, returning the dead lease.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> Option<Lease> {
        match std::mem::take(&mut self.state) {
            SeatState::Leased(lease) if lease.is_expired_at(now) => Some(lease),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Leases an available seat to `actor_id`.
    ///
    /// The lease id is only generated once the seat is known to be free.
    pub fn acquire(
        &mut self,
        actor_id: &str,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
        next_id: impl FnOnce() -> LeaseId,
    ) -> Result<Lease, LeaseError> {
        if !matches!(self.state, SeatState::Available) {
            return Err(LeaseError::Conflict {
                seat_id: self.id.clone(),
                state: self.status(),
            });
        }

        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let lease = Lease {
            id: next_id(),
            holder: actor_id.to_string(),
            issued_at: now,
            expires_at,
        };
        self.state = SeatState::Leased(lease.clone());
        Ok(lease)
    }

    /// Converts a valid, unexpired lease into a commit.
    ///
    /// Checks, in order: leased, holder, lease id, expiry. A lapsed lease is
    /// reclaimed first; its own holder gets [`LeaseError::LeaseExpired`],
    /// anyone else sees an available seat.
    pub fn commit(
        &mut self,
        actor_id: &str,
        lease_id: &LeaseId,
        now: DateTime<Utc>,
    ) -> Result<(), LeaseError> {
        let lapsed = self.expire_if_due(now);
        self.commit_after_expiry(lapsed.as_ref(), actor_id, lease_id, now)
    }

    /// [`Seat::commit`] for callers that already ran [`Seat::expire_if_due`]
    /// with the same `now`; `lapsed` is the lease it reclaimed, if any.
    pub fn commit_after_expiry(
        &mut self,
        lapsed: Option<&Lease>,
        actor_id: &str,
        lease_id: &LeaseId,
        now: DateTime<Utc>,
    ) -> Result<(), LeaseError> {
        if let Some(lapsed) = lapsed.filter(|lease| lease.is_held_by(actor_id, lease_id)) {
            return Err(LeaseError::LeaseExpired {
                seat_id: self.id.clone(),
                expired_at: lapsed.expires_at,
            });
        }

        let lease = self.active_lease()?;
        if lease.holder != actor_id {
            return Err(LeaseError::WrongHolder {
                seat_id: self.id.clone(),
            });
        }
        if lease.id != *lease_id {
            return Err(LeaseError::InvalidLease {
                seat_id: self.id.clone(),
            });
        }

        let holder = lease.holder.clone();
        self.state = SeatState::Committed {
            holder,
            committed_at: now,
        };
        Ok(())
    }

    /// Gives a held lease back, returning the seat to available.
    ///
    /// Wrong actor and wrong lease id are reported as one outcome.
    pub fn release(
        &mut self,
        actor_id: &str,
        lease_id: &LeaseId,
        now: DateTime<Utc>,
    ) -> Result<Lease, LeaseError> {
        self.expire_if_due(now);

        match std::mem::take(&mut self.state) {
            SeatState::Leased(lease) if lease.is_held_by(actor_id, lease_id) => Ok(lease),
            other => {
                let err = match &other {
                    SeatState::Leased(_) => LeaseError::HolderMismatch {
                        seat_id: self.id.clone(),
                    },
                    _ => LeaseError::NotLeased {
                        seat_id: self.id.clone(),
                        state: other.status(),
                    },
                };
                self.state = other;
                Err(err)
            }
        }
    }

    /// Point-in-time view for callers.
    pub fn snapshot(&self) -> SeatSnapshot {
        let mut snapshot = SeatSnapshot {
            id: self.id.clone(),
            state: self.status(),
            holder: None,
            lease_issued_at: None,
            lease_expires_at: None,
            committed_at: None,
        };

        match &self.state {
            SeatState::Available => {}
            SeatState::Leased(lease) => {
                snapshot.holder = Some(lease.holder.clone());
                snapshot.lease_issued_at = Some(lease.issued_at);
                snapshot.lease_expires_at = Some(lease.expires_at);
            }
            SeatState::Committed {
                holder,
                committed_at,
            } => {
                snapshot.holder = Some(holder.clone());
                snapshot.committed_at = Some(*committed_at);
            }
        }

        snapshot
    }

    fn active_lease(&self) -> Result<&Lease, LeaseError> {
        match &self.state {
            SeatState::Leased(lease) => Ok(lease),
            other => Err(LeaseError::NotLeased {
                seat_id: self.id.clone(),
                state: other.status(),
            }),
        }
    }
}

/// Serializable view of a seat.
///
/// The lease token is never part of a snapshot; it is only handed to the
/// actor that acquired the lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// Seat identifier.
    pub id: SeatId,
    /// State label.
    pub state: SeatStatus,
    /// Lease holder or committing actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// When the active lease was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_issued_at: Option<DateTime<Utc>>,
    /// When the active lease lapses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_expires_at: Option<DateTime<Utc>>,
    /// When the seat was committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
}
