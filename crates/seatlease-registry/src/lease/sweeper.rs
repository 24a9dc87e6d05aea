//! Periodic background reclamation of expired leases.
//!
//! Write operations already expire their own seat lazily; the sweeper only
//! exists so that capacity frees up promptly for readers that never touch
//! a specific seat. It takes the same per-seat locks as every other path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use seatlease_core::error::AppError;

use super::registry::LeaseRegistry;

/// Spawns the background sweep task.
#[derive(Debug)]
pub struct LeaseSweeper;

impl LeaseSweeper {
    /// Starts sweeping `registry` every `period` on the current runtime.
    ///
    /// The first sweep runs immediately.
    pub fn spawn(registry: Arc<LeaseRegistry>, period: Duration) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut reclaimed_total = 0u64;

            info!(period_ms = period.as_millis() as u64, "Lease sweeper started");

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let reclaimed = registry.sweep_expired().await;
                        if reclaimed > 0 {
                            info!(reclaimed, "Lease sweeper reclaimed expired seats");
                        }
                        reclaimed_total += reclaimed as u64;
                    }
                    changed = shutdown_rx.changed() => {
                        // A dropped handle also stops the sweeper.
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            debug!(reclaimed_total, "Lease sweeper stopped");
            reclaimed_total
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner of a running sweeper.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl SweeperHandle {
    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the sweeper and waits for it; returns the seats it reclaimed.
    pub async fn shutdown(self) -> Result<u64, AppError> {
        // Err only means the task already exited.
        let _ = self.shutdown.send(true);

        self.task
            .await
            .map_err(|e| AppError::internal(format!("Lease sweeper task failed: {e}")))
    }
}
