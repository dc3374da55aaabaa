//! Codec for the persisted quote collection.
//!
//! The store holds two keys: [`QUOTES_KEY`] with a JSON array of quotes and
//! [`SELECTED_CATEGORY_KEY`] with the plain selected category string.

use crate::{error::Result, Error, Quote};

/// Store key holding the serialized collection.
pub const QUOTES_KEY: &str = "quotes";

/// Store key holding the selected category.
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Serialize the collection for storage.
pub fn encode_quotes(quotes: &[Quote]) -> Result<String> {
    serde_json::to_string(quotes).map_err(|e| Error::Serialization(e.to_string()))
}

/// Serialize the collection as a pretty-printed export file.
pub fn encode_quotes_pretty(quotes: &[Quote]) -> Result<String> {
    serde_json::to_string_pretty(quotes).map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserialize a stored collection.
///
/// Unlike imports this is strict: any malformed entry rejects the whole
/// value, and the caller falls back to the default quotes.
pub fn decode_quotes(json: &str) -> Result<Vec<Quote>> {
    serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))
}
