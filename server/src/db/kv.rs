//! Key-value store holding the persisted quote collection.

use quotesync_engine::{
    decode_quotes, encode_quotes, CategoryFilter, QuoteBook, QUOTES_KEY, SELECTED_CATEGORY_KEY,
};
use sqlx::Row;

use super::Pool;

/// Errors from reading or writing the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("encoding error: {0}")]
    Encode(#[from] quotesync_engine::Error),
}

/// String key-value store over the `kv` table.
#[derive(Debug, Clone)]
pub struct KvStore {
    pool: Pool,
}

impl KvStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Read a value.
    pub async fn get(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_get("value")).transpose()
    }

    /// Insert or replace a value.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load the quote book.
    ///
    /// A missing or malformed collection falls back to the default quotes.
    pub async fn load_book(&self) -> Result<QuoteBook, StoreError> {
        let mut book = match self.get(QUOTES_KEY).await? {
            Some(json) => match decode_quotes(&json) {
                Ok(quotes) => QuoteBook::new(quotes),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored quotes are malformed, using defaults");
                    QuoteBook::with_defaults()
                }
            },
            None => {
                tracing::info!("No stored quotes, using defaults");
                QuoteBook::with_defaults()
            }
        };

        if let Some(selected) = self.get(SELECTED_CATEGORY_KEY).await? {
            book.restore_selection(CategoryFilter::parse(&selected));
        }

        tracing::debug!(
            quotes = book.len(),
            selected = %book.selected_category(),
            "Loaded quote book"
        );

        Ok(book)
    }

    /// Persist the quote collection.
    pub async fn save_quotes(&self, book: &QuoteBook) -> Result<(), StoreError> {
        let json = encode_quotes(book.quotes())?;
        self.set(QUOTES_KEY, &json).await?;
        Ok(())
    }

    /// Persist the selected category.
    pub async fn save_selection(&self, book: &QuoteBook) -> Result<(), StoreError> {
        self.set(SELECTED_CATEGORY_KEY, book.selected_category().as_str())
            .await?;
        Ok(())
    }
}
