//! Parsing of user-supplied quote files.
//!
//! An import file is a JSON array. Only objects carrying non-blank string
//! `text` and `category` fields are kept; everything else is counted and
//! dropped.

use crate::{error::Result, Error, Quote};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Quotes that survived shape-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatch {
    pub quotes: Vec<Quote>,
    pub skipped: usize,
}

/// What an import did to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Entries that passed shape-checking
    pub accepted: usize,
    /// Entries that were dropped
    pub skipped: usize,
    /// Merge outcome for the accepted entries
    pub result: crate::SyncResult,
}

/// Parse the contents of an import file.
///
/// Fails with [`Error::InvalidImport`] when the input is not a JSON array and
/// with [`Error::EmptyImport`] when no entry survives.
pub fn parse_import(json: &str) -> Result<ImportBatch> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::InvalidImport(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(Error::InvalidImport("expected a JSON array".into()));
    };

    let total = entries.len();
    let quotes: Vec<Quote> = entries.iter().filter_map(quote_from_value).collect();

    if quotes.is_empty() {
        return Err(Error::EmptyImport);
    }

    Ok(ImportBatch {
        skipped: total - quotes.len(),
        quotes,
    })
}

fn quote_from_value(value: &Value) -> Option<Quote> {
    let text = value.get("text")?.as_str()?;
    let category = value.get("category")?.as_str()?;
    Quote::parse(text, category).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_entries() {
        let json = r#"[
            {"text": "A", "category": "X"},
            {"text": "B", "category": "Y"}
        ]"#;

        let batch = parse_import(json).unwrap();
        assert_eq!(batch.quotes, vec![Quote::new("A", "X"), Quote::new("B", "Y")]);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn drops_entries_missing_category() {
        let json = r#"[
            {"text": "A"},
            {"text": "B", "category": "Y"}
        ]"#;

        let batch = parse_import(json).unwrap();
        assert_eq!(batch.quotes, vec![Quote::new("B", "Y")]);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn drops_wrongly_typed_and_blank_entries() {
        let json = r#"[
            {"text": 12, "category": "X"},
            {"text": "A", "category": ["X"]},
            {"text": "   ", "category": "X"},
            "just a string",
            null,
            {"text": " C ", "category": " Z ", "extra": true}
        ]"#;

        let batch = parse_import(json).unwrap();
        assert_eq!(batch.quotes, vec![Quote::new("C", "Z")]);
        assert_eq!(batch.skipped, 5);
    }

    #[test]
    fn server_id_is_not_imported() {
        let batch = parse_import(r#"[{"text": "A", "category": "X", "serverId": "9"}]"#).unwrap();
        assert!(batch.quotes[0].server_id.is_none());
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_import(r#"{"text": "A", "category": "X"}"#).unwrap_err();
        assert_eq!(err, Error::InvalidImport("expected a JSON array".into()));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_import("[{\"text\": "),
            Err(Error::InvalidImport(_))
        ));
    }

    #[test]
    fn rejects_when_nothing_survives() {
        assert_eq!(parse_import("[]"), Err(Error::EmptyImport));
        assert_eq!(
            parse_import(r#"[{"category": "X"}]"#),
            Err(Error::EmptyImport)
        );
    }
}
