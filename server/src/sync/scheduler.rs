//! Periodic sync timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{SyncError, SyncService};

/// Run a sync cycle every `every`, starting immediately.
///
/// Ticks that land while a cycle is still running are skipped by the
/// service itself.
pub fn spawn_scheduler(service: Arc<SyncService>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(interval_secs = every.as_secs(), "Sync scheduler started");

        loop {
            ticker.tick().await;
            // Failures are logged and recorded by the service
            if let Err(SyncError::Busy) = service.sync_once().await {
                tracing::debug!("Scheduled sync skipped, previous cycle still running");
            }
        }
    })
}
