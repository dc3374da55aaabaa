//! # QuoteSync Engine
//!
//! Deterministic merge logic for a local quote collection that is kept in
//! sync with a remote source.
//!
//! This crate holds everything that does not need the outside world: the
//! quote model, the reconciler, the owned collection and the JSON codecs used
//! for storage, import and export.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing about files, network or timers
//! - **Deterministic**: the same inputs always produce the same merge
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Quotes
//!
//! A [`Quote`] is a text/category pair. Quotes pulled from the remote also
//! carry an opaque server id. The `text` is the identity key for merges.
//!
//! ### Reconciliation
//!
//! [`reconcile`] merges remote quotes into the local collection:
//! - unknown text is appended
//! - known text with a different category is overwritten (remote wins) and
//!   reported as a conflict
//! - everything else is left alone
//!
//! Re-running a merge with the same remote quotes is a no-op.
//!
//! ## Quick Start
//!
//! ```rust
//! use quotesync_engine::{Quote, QuoteBook, SERVER_CATEGORY};
//!
//! let mut book = QuoteBook::new(vec![Quote::new("A", "X")]);
//!
//! let result = book.merge_remote(vec![
//!     Quote::new("A", "Y"),
//!     Quote::from_server("B", "1"),
//! ]);
//!
//! assert_eq!(result.added, 1);
//! assert_eq!(result.updated, 1);
//! assert_eq!(result.conflicts, vec!["A".to_string()]);
//! assert_eq!(book.quotes()[1].category, SERVER_CATEGORY);
//! ```
//!
//! ## Persistence
//!
//! [`encode_quotes`] and [`decode_quotes`] convert the collection to and from
//! the stored JSON array. [`QuoteBook::export_json`] and
//! [`QuoteBook::import_json`] handle user-facing files.

pub mod book;
pub mod error;
pub mod import;
pub mod quote;
pub mod reconcile;
pub mod snapshot;

// Re-export main types at crate root
pub use book::QuoteBook;
pub use error::Error;
pub use import::{parse_import, ImportBatch, ImportSummary};
pub use quote::{default_quotes, CategoryFilter, Quote, ALL_CATEGORIES, SERVER_CATEGORY};
pub use reconcile::{local_only, reconcile, Reconciler, SyncResult};
pub use snapshot::{
    decode_quotes, encode_quotes, encode_quotes_pretty, QUOTES_KEY, SELECTED_CATEGORY_KEY,
};

/// Opaque identifier assigned by the remote.
pub type ServerId = String;
