//! HTTP implementation of the remote quote source.

use std::time::Duration;

use async_trait::async_trait;
use quotesync_engine::Quote;
use serde::Serialize;
use serde_json::Value;

use super::{QuoteSource, RemoteError};

/// Body sent when pushing a quote.
#[derive(Debug, Serialize)]
struct PushBody<'a> {
    title: &'a str,
    body: &'a str,
}

/// Remote reached over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    url: String,
}

impl HttpRemote {
    /// Create a client for the given collection endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl QuoteSource for HttpRemote {
    async fn fetch_quotes(&self, limit: usize) -> Result<Vec<Quote>, RemoteError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        let body: Value = response.json().await?;
        records_to_quotes(body, limit)
    }

    async fn push_quote(&self, quote: &Quote) -> Result<(), RemoteError> {
        let body = PushBody {
            title: &quote.text,
            body: &quote.category,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        Ok(())
    }
}

/// Map the first `limit` remote records to server quotes.
///
/// Records without a string `title` or a usable `id` are skipped.
pub(crate) fn records_to_quotes(body: Value, limit: usize) -> Result<Vec<Quote>, RemoteError> {
    let Value::Array(records) = body else {
        return Err(RemoteError::Malformed("expected a JSON array".into()));
    };

    let quotes = records
        .into_iter()
        .take(limit)
        .filter_map(|record| {
            let quote = record_to_quote(&record);
            if quote.is_none() {
                tracing::debug!(%record, "Skipping remote record without id/title");
            }
            quote
        })
        .collect();

    Ok(quotes)
}

fn record_to_quote(record: &Value) -> Option<Quote> {
    let title = record.get("title")?.as_str()?;
    let id = match record.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(Quote::from_server(title, id))
}
