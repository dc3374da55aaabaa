//! Shared test fixtures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quotesync_engine::{Quote, QuoteBook};
use reqwest::StatusCode;
use tokio::sync::Notify;

use crate::db::{create_pool, run_migrations, KvStore};
use crate::remote::{QuoteSource, RemoteError};
use crate::AppState;

/// Fresh store backed by an in-memory database.
pub async fn memory_store() -> KvStore {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    KvStore::new(pool)
}

/// Scripted remote that records what was pushed.
#[derive(Default)]
pub struct MockRemote {
    quotes: Vec<Quote>,
    fail_fetch: AtomicBool,
    fail_push: AtomicBool,
    pushed: Mutex<Vec<Quote>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockRemote {
    pub fn with_quotes(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            ..Self::default()
        }
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_push(&self, fail: bool) {
        self.fail_push.store(fail, Ordering::SeqCst);
    }

    /// Make every fetch wait until the returned handle is notified.
    pub fn gate_fetches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn pushed(&self) -> Vec<Quote> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSource for MockRemote {
    async fn fetch_quotes(&self, limit: usize) -> Result<Vec<Quote>, RemoteError> {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(RemoteError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }

        Ok(self.quotes.iter().take(limit).cloned().collect())
    }

    async fn push_quote(&self, quote: &Quote) -> Result<(), RemoteError> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(RemoteError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }

        self.pushed.lock().unwrap().push(quote.clone());
        Ok(())
    }
}

/// Application state over an in-memory store and the given remote.
pub async fn test_state(book: QuoteBook, remote: Arc<MockRemote>) -> AppState {
    AppState::new(
        book,
        memory_store().await,
        remote,
        10,
        Duration::from_secs(3),
    )
}
