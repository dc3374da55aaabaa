//! Reconciliation of a local quote collection with a remote snapshot.
//!
//! Given the local collection and the quotes fetched from the remote, this
//! module produces the merged collection and a summary of what changed.
//!
//! # Algorithm
//!
//! 1. Index the local collection by `text`, first occurrence wins
//! 2. Walk the remote quotes in order
//! 3. Unknown text is appended, known text with a different category is
//!    overwritten in place (remote wins), equal categories are left alone
//! 4. Return the merged collection and the [`SyncResult`]
//!
//! Later local duplicates of a text are never addressed by the index; they
//! keep their position and category.

use crate::Quote;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Outcome of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Remote quotes appended to the collection
    pub added: usize,
    /// Local quotes whose category was overwritten
    pub updated: usize,
    /// Texts whose category differed, in discovery order
    pub conflicts: Vec<String>,
}

impl SyncResult {
    /// Whether the merge changed nothing.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.updated == 0
    }
}

impl fmt::Display for SyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            return f.write_str("Quotes are up to date");
        }
        write!(
            f,
            "Synced: {} added, {} updated",
            self.added, self.updated
        )?;
        if !self.conflicts.is_empty() {
            write!(
                f,
                ", {} conflict(s) resolved in favor of the server",
                self.conflicts.len()
            )?;
        }
        Ok(())
    }
}

/// Merges remote quotes into a local collection.
#[derive(Debug, Clone)]
pub struct Reconciler {
    quotes: Vec<Quote>,
    /// Position of the canonical (first) quote for each text
    index: HashMap<String, usize>,
    result: SyncResult,
}

impl Reconciler {
    /// Start a reconciliation over the given local collection.
    pub fn new(local: Vec<Quote>) -> Self {
        let mut index = HashMap::with_capacity(local.len());
        for (position, quote) in local.iter().enumerate() {
            index.entry(quote.text.clone()).or_insert(position);
        }

        Self {
            quotes: local,
            index,
            result: SyncResult::default(),
        }
    }

    /// Merge a single remote quote.
    pub fn merge_one(&mut self, remote: Quote) {
        match self.index.get(&remote.text) {
            None => {
                self.index.insert(remote.text.clone(), self.quotes.len());
                self.quotes.push(Quote::new(remote.text, remote.category));
                self.result.added += 1;
            }
            Some(&position) => {
                let existing = &mut self.quotes[position];
                if existing.category != remote.category {
                    existing.category = remote.category;
                    self.result.updated += 1;
                    self.result.conflicts.push(remote.text);
                }
            }
        }
    }

    /// Merge remote quotes in order.
    pub fn merge(&mut self, remote: impl IntoIterator<Item = Quote>) {
        for quote in remote {
            self.merge_one(quote);
        }
    }

    /// Current state of the collection (for inspection mid-merge).
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Finish and return the merged collection with its summary.
    pub fn finish(self) -> (Vec<Quote>, SyncResult) {
        (self.quotes, self.result)
    }
}

/// Merge `remote` into `local`, remote wins on category.
pub fn reconcile(
    local: Vec<Quote>,
    remote: impl IntoIterator<Item = Quote>,
) -> (Vec<Quote>, SyncResult) {
    let mut reconciler = Reconciler::new(local);
    reconciler.merge(remote);
    reconciler.finish()
}

/// Local quotes whose text does not appear in `remote`, in local order.
pub fn local_only(local: &[Quote], remote: &[Quote]) -> Vec<Quote> {
    let known: HashSet<&str> = remote.iter().map(|q| q.text.as_str()).collect();
    local
        .iter()
        .filter(|q| !known.contains(q.text.as_str()))
        .cloned()
        .collect()
}
