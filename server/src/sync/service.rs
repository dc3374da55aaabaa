//! Sync orchestration.
//!
//! One cycle:
//! 1. Fetch a bounded batch of remote quotes
//! 2. Reconcile them into a copy of the local book
//! 3. Persist the copy, then swap it in
//! 4. Push local-only quotes back to the remote, best-effort
//!
//! A failed fetch or write leaves the local book and store untouched.
//! Only one cycle runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use quotesync_engine::{local_only, Quote, QuoteBook, SyncResult};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::SyncStatus;
use crate::db::{KvStore, StoreError};
use crate::remote::{QuoteSource, RemoteError};

/// The local quote book shared between handlers and the sync service.
pub type SharedBook = Arc<Mutex<QuoteBook>>;

/// Why a sync cycle did not produce a result.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("a sync cycle is already running")]
    Busy,

    #[error("fetching remote quotes failed: {0}")]
    Fetch(#[from] RemoteError),

    #[error("saving merged quotes failed: {0}")]
    Storage(#[from] StoreError),
}

/// Drives sync cycles against a remote.
pub struct SyncService {
    book: SharedBook,
    store: KvStore,
    remote: Arc<dyn QuoteSource>,
    fetch_limit: usize,
    status_ttl: chrono::Duration,
    running: AtomicBool,
    status: RwLock<SyncStatus>,
}

/// Clears the running flag when a cycle ends, however it ends.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SyncService {
    pub fn new(
        book: SharedBook,
        store: KvStore,
        remote: Arc<dyn QuoteSource>,
        fetch_limit: usize,
        status_ttl: std::time::Duration,
    ) -> Self {
        Self {
            book,
            store,
            remote,
            fetch_limit,
            status_ttl: chrono::Duration::from_std(status_ttl)
                .unwrap_or_else(|_| chrono::Duration::seconds(3)),
            running: AtomicBool::new(false),
            status: RwLock::new(SyncStatus::default()),
        }
    }

    /// Whether a cycle is in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Current status as visible now.
    pub async fn status(&self) -> SyncStatus {
        let mut status = self.status.read().await.snapshot(Utc::now());
        status.running = self.is_running();
        status
    }

    /// Run one sync cycle.
    ///
    /// Returns [`SyncError::Busy`] without doing anything if another cycle is
    /// still running.
    pub async fn sync_once(&self) -> Result<SyncResult, SyncError> {
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            tracing::debug!("Sync already in flight, skipping");
            return Err(SyncError::Busy);
        };

        let cycle_id = Uuid::new_v4();
        tracing::debug!(%cycle_id, "Sync cycle started");

        let outcome = self.run_cycle(cycle_id).await;

        let mut status = self.status.write().await;
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    %cycle_id,
                    added = result.added,
                    updated = result.updated,
                    conflicts = result.conflicts.len(),
                    "Sync cycle finished"
                );
                status.record_success(result, Utc::now(), self.status_ttl);
            }
            Err(e) => {
                tracing::warn!(%cycle_id, error = %e, "Sync cycle failed");
                status.record_failure(&e.to_string(), Utc::now(), self.status_ttl);
            }
        }

        outcome
    }

    async fn run_cycle(&self, cycle_id: Uuid) -> Result<SyncResult, SyncError> {
        let remote = self.remote.fetch_quotes(self.fetch_limit).await?;
        tracing::debug!(%cycle_id, fetched = remote.len(), "Fetched remote quotes");

        let (result, outgoing) = {
            let mut book = self.book.lock().await;
            let outgoing = local_only(book.quotes(), &remote);

            let mut merged = book.clone();
            let result = merged.merge_remote(remote);
            self.store.save_quotes(&merged).await?;
            if merged.selected_category() != book.selected_category() {
                tracing::info!(%cycle_id, "Selected category vanished, showing all quotes");
                self.store.save_selection(&merged).await?;
            }
            *book = merged;

            (result, outgoing)
        };

        let failures = self.push_back(cycle_id, &outgoing).await;
        if failures > 0 {
            self.status.write().await.record_push_failures(failures);
        }

        Ok(result)
    }

    /// Push quotes concurrently; returns how many pushes failed.
    async fn push_back(&self, cycle_id: Uuid, quotes: &[Quote]) -> usize {
        let pushes = quotes.iter().map(|quote| async move {
            let outcome = self.remote.push_quote(quote).await;
            (quote, outcome)
        });

        let mut failures = 0;
        for (quote, outcome) in join_all(pushes).await {
            if let Err(e) = outcome {
                failures += 1;
                tracing::warn!(%cycle_id, text = %quote.text, error = %e, "Failed to push quote");
            }
        }

        tracing::debug!(
            %cycle_id,
            pushed = quotes.len() - failures,
            failed = failures,
            "Pushed local quotes"
        );

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{memory_store, MockRemote};
    use quotesync_engine::{CategoryFilter, QUOTES_KEY, SELECTED_CATEGORY_KEY, SERVER_CATEGORY};
    use std::time::Duration;

    async fn service_with(
        book: QuoteBook,
        remote: Arc<MockRemote>,
    ) -> (Arc<SyncService>, SharedBook, KvStore) {
        let store = memory_store().await;
        let shared = Arc::new(Mutex::new(book));
        let service = Arc::new(SyncService::new(
            shared.clone(),
            store.clone(),
            remote,
            10,
            Duration::from_secs(3),
        ));
        (service, shared, store)
    }

    #[tokio::test]
    async fn merges_persists_and_pushes() {
        let remote = Arc::new(MockRemote::with_quotes(vec![
            Quote::from_server("A", "1"),
            Quote::from_server("B", "2"),
        ]));
        let book = QuoteBook::new(vec![Quote::new("A", "X"), Quote::new("C", "Z")]);
        let (service, shared, store) = service_with(book, remote.clone()).await;

        let result = service.sync_once().await.unwrap();

        assert_eq!(result.added, 1);
        assert_eq!(result.updated, 1);
        assert_eq!(result.conflicts, vec!["A".to_string()]);

        let book = shared.lock().await;
        assert_eq!(
            book.quotes(),
            &[
                Quote::new("A", SERVER_CATEGORY),
                Quote::new("C", "Z"),
                Quote::new("B", SERVER_CATEGORY),
            ]
        );

        let stored = store.load_book().await.unwrap();
        assert_eq!(stored.quotes(), book.quotes());

        assert_eq!(remote.pushed(), vec![Quote::new("C", "Z")]);
    }

    #[tokio::test]
    async fn vanished_selection_is_reset_and_persisted() {
        let remote = Arc::new(MockRemote::with_quotes(vec![Quote::from_server("A", "1")]));
        let mut book = QuoteBook::new(vec![Quote::new("A", "X"), Quote::new("B", "Y")]);
        book.select_category(CategoryFilter::Category("X".into()))
            .unwrap();
        let (service, shared, store) = service_with(book, remote).await;

        service.sync_once().await.unwrap();

        assert_eq!(shared.lock().await.selected_category(), &CategoryFilter::All);
        assert_eq!(
            store.get(SELECTED_CATEGORY_KEY).await.unwrap().as_deref(),
            Some("all")
        );
        assert_eq!(
            store.load_book().await.unwrap().selected_category(),
            &CategoryFilter::All
        );
    }

    #[tokio::test]
    async fn fetch_limit_is_forwarded() {
        let remote = Arc::new(MockRemote::with_quotes(
            (1..=20)
                .map(|i| Quote::from_server(format!("post {}", i), i.to_string()))
                .collect(),
        ));
        let (service, shared, _) = service_with(QuoteBook::default(), remote).await;

        let result = service.sync_once().await.unwrap();
        assert_eq!(result.added, 10);
        assert_eq!(shared.lock().await.len(), 10);
    }

    #[tokio::test]
    async fn second_cycle_is_noop() {
        let remote = Arc::new(MockRemote::with_quotes(vec![Quote::from_server("A", "1")]));
        let (service, _, _) = service_with(QuoteBook::with_defaults(), remote).await;

        service.sync_once().await.unwrap();
        let second = service.sync_once().await.unwrap();

        assert_eq!(second, SyncResult::default());
        assert_eq!(service.status().await.cycles, 2);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_state_untouched() {
        let remote = Arc::new(MockRemote::with_quotes(vec![Quote::from_server("A", "1")]));
        remote.fail_fetch(true);
        let book = QuoteBook::new(vec![Quote::new("C", "Z")]);
        let (service, shared, store) = service_with(book.clone(), remote.clone()).await;

        let err = service.sync_once().await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(_)));

        assert_eq!(*shared.lock().await, book);
        assert_eq!(store.get(QUOTES_KEY).await.unwrap(), None);
        assert!(remote.pushed().is_empty());

        let status = service.status().await;
        assert!(status.last_error.is_some());
        assert!(status
            .message
            .as_deref()
            .is_some_and(|m| m.starts_with("Sync failed")));
    }

    #[tokio::test]
    async fn push_failures_do_not_affect_result() {
        let remote = Arc::new(MockRemote::with_quotes(vec![Quote::from_server("A", "1")]));
        remote.fail_push(true);
        let book = QuoteBook::new(vec![Quote::new("C", "Z"), Quote::new("D", "Z")]);
        let (service, shared, _) = service_with(book, remote).await;

        let result = service.sync_once().await.unwrap();

        assert_eq!(result.added, 1);
        assert_eq!(shared.lock().await.len(), 3);

        let status = service.status().await;
        assert_eq!(status.push_failures, 2);
        assert_eq!(status.last_error, None);
    }

    #[tokio::test]
    async fn overlapping_cycle_is_skipped() {
        let remote = Arc::new(MockRemote::with_quotes(vec![Quote::from_server("A", "1")]));
        let gate = remote.gate_fetches();
        let (service, shared, _) = service_with(QuoteBook::default(), remote).await;

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.sync_once().await }
        });

        while !service.is_running() {
            tokio::task::yield_now().await;
        }

        assert!(matches!(service.sync_once().await, Err(SyncError::Busy)));

        gate.notify_one();
        let result = first.await.unwrap().unwrap();
        assert_eq!(result.added, 1);
        assert_eq!(shared.lock().await.len(), 1);
        assert!(!service.is_running());

        // The skipped attempt is not counted as a cycle
        assert_eq!(service.status().await.cycles, 1);
    }
}
