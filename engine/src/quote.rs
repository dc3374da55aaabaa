//! Quote types and the category filter.

use crate::{error::Result, Error, ServerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to every record pulled from the remote.
pub const SERVER_CATEGORY: &str = "Server";

/// Literal used for the "no filter" category selection.
pub const ALL_CATEGORIES: &str = "all";

/// A single quote.
///
/// `text` doubles as the identity key when merging collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// The quote itself
    pub text: String,
    /// Free-form category label
    pub category: String,
    /// Identifier assigned by the remote, absent for local quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<ServerId>,
}

impl Quote {
    /// Create a local quote.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            server_id: None,
        }
    }

    /// Create a quote received from the remote.
    pub fn from_server(text: impl Into<String>, server_id: impl Into<ServerId>) -> Self {
        Self {
            text: text.into(),
            category: SERVER_CATEGORY.to_string(),
            server_id: Some(server_id.into()),
        }
    }

    /// Build a quote from user input, trimming both fields.
    ///
    /// Either field being blank is rejected.
    pub fn parse(text: &str, category: &str) -> Result<Self> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(Error::MissingField("text".into()));
        }
        if category.is_empty() {
            return Err(Error::MissingField("category".into()));
        }
        Ok(Self::new(text, category))
    }

    /// Whether this quote came from the remote.
    pub fn is_from_server(&self) -> bool {
        self.server_id.is_some()
    }
}

/// Which quotes are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every quote
    #[default]
    All,
    /// Only quotes in the named category
    Category(String),
}

impl CategoryFilter {
    /// Parse the persisted form. Blank input and `"all"` both mean no filter.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    /// Check whether a quote passes the filter.
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => quote.category == *name,
        }
    }

    /// The persisted form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(name) => name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// The quotes a fresh collection starts with.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        Quote::new(
            "Success is not the key to happiness. Happiness is the key to success.",
            "Inspiration",
        ),
        Quote::new(
            "Don’t watch the clock; do what it does. Keep going.",
            "Productivity",
        ),
        Quote::new("Believe you can and you're halfway there.", "Confidence"),
    ]
}
