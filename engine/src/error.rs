//! Error types for the QuoteSync engine.

use thiserror::Error;

/// All possible errors from the QuoteSync engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Input errors
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    // Import errors
    #[error("invalid import: {0}")]
    InvalidImport(String),

    #[error("no valid quotes found in import")]
    EmptyImport,

    // State errors
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
