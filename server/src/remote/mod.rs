//! Remote quote source.
//!
//! The remote is a third-party collection endpoint. Records come back as
//! `{id, title, ...}` and are turned into quotes in the fixed server category;
//! local quotes are pushed as `{title, body}`.

mod http;

pub use http::*;

use async_trait::async_trait;
use quotesync_engine::Quote;

/// Errors talking to the remote.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Something that can hand out remote quotes and accept local ones.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch at most `limit` quotes.
    async fn fetch_quotes(&self, limit: usize) -> Result<Vec<Quote>, RemoteError>;

    /// Push a single local quote.
    async fn push_quote(&self, quote: &Quote) -> Result<(), RemoteError>;
}
