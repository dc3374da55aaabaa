//! Record of recent sync outcomes.

use chrono::{DateTime, Duration, Utc};
use quotesync_engine::SyncResult;
use serde::Serialize;

/// What the last sync cycles did.
///
/// The status `message` is transient: it disappears once its expiry passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// Whether a cycle is in flight right now
    pub running: bool,
    /// Completed cycles, successful or not
    pub cycles: u64,
    /// Result of the last successful cycle
    pub last_result: Option<SyncResult>,
    /// When the last successful cycle finished
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Error of the last failed cycle, cleared by the next success
    pub last_error: Option<String>,
    /// Push-back failures since startup
    pub push_failures: u64,
    /// Human-readable status line
    pub message: Option<String>,
    #[serde(skip)]
    message_expires_at: Option<DateTime<Utc>>,
}

impl SyncStatus {
    pub fn record_success(&mut self, result: &SyncResult, now: DateTime<Utc>, ttl: Duration) {
        self.cycles += 1;
        self.last_result = Some(result.clone());
        self.last_synced_at = Some(now);
        self.last_error = None;
        self.set_message(result.to_string(), now, ttl);
    }

    pub fn record_failure(&mut self, error: &str, now: DateTime<Utc>, ttl: Duration) {
        self.cycles += 1;
        self.last_error = Some(error.to_string());
        self.set_message(format!("Sync failed: {}", error), now, ttl);
    }

    pub fn record_push_failures(&mut self, count: usize) {
        self.push_failures += count as u64;
    }

    fn set_message(&mut self, message: String, now: DateTime<Utc>, ttl: Duration) {
        self.message = Some(message);
        self.message_expires_at = Some(now + ttl);
    }

    /// Copy of the status as visible at `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> SyncStatus {
        let mut status = self.clone();
        if status.message_expires_at.is_some_and(|at| now >= at) {
            status.message = None;
            status.message_expires_at = None;
        }
        status
    }
}
