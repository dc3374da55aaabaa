//! QuoteBook - the in-memory quote collection.
//!
//! The QuoteBook owns the local collection and the selected category filter.
//! Every mutation goes through it; callers persist it afterwards.

use crate::{
    default_quotes,
    error::Result,
    import::{parse_import, ImportSummary},
    reconcile::Reconciler,
    snapshot::encode_quotes_pretty,
    CategoryFilter, Error, Quote, SyncResult,
};
use std::collections::BTreeSet;

/// The local quote collection plus its category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
    selected: CategoryFilter,
}

impl QuoteBook {
    /// Create a book over existing quotes with no filter.
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            selected: CategoryFilter::All,
        }
    }

    /// Create a book holding the default quotes.
    pub fn with_defaults() -> Self {
        Self::new(default_quotes())
    }

    /// All quotes in collection order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Number of quotes, ignoring the filter.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Check if the book holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Add a quote from user input.
    pub fn add(&mut self, text: &str, category: &str) -> Result<&Quote> {
        let quote = Quote::parse(text, category)?;
        self.quotes.push(quote);
        Ok(&self.quotes[self.quotes.len() - 1])
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.quotes
            .iter()
            .map(|q| q.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn has_category(&self, name: &str) -> bool {
        self.quotes.iter().any(|q| q.category == name)
    }

    /// The current category filter.
    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected
    }

    /// Change the category filter.
    pub fn select_category(&mut self, filter: CategoryFilter) -> Result<()> {
        if let CategoryFilter::Category(name) = &filter {
            if !self.has_category(name) {
                return Err(Error::UnknownCategory(name.clone()));
            }
        }
        self.selected = filter;
        Ok(())
    }

    /// Restore a persisted selection, falling back to no filter when the
    /// category no longer exists.
    pub fn restore_selection(&mut self, filter: CategoryFilter) {
        if self.select_category(filter).is_err() {
            self.selected = CategoryFilter::All;
        }
    }

    /// Drop the filter if its category has disappeared from the collection.
    fn revalidate_selection(&mut self) {
        let selected = std::mem::take(&mut self.selected);
        self.restore_selection(selected);
    }

    /// Quotes visible under the current filter.
    pub fn filtered(&self) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| self.selected.matches(q))
            .collect()
    }

    /// Pick a visible quote; `index` wraps around the visible count.
    pub fn pick(&self, index: usize) -> Option<&Quote> {
        let visible = self.filtered();
        if visible.is_empty() {
            return None;
        }
        Some(visible[index % visible.len()])
    }

    /// Merge remote quotes into the collection (remote wins on category).
    ///
    /// If the merge moves every quote out of the selected category, the
    /// selection falls back to [`CategoryFilter::All`].
    pub fn merge_remote(&mut self, remote: impl IntoIterator<Item = Quote>) -> SyncResult {
        let mut reconciler = Reconciler::new(std::mem::take(&mut self.quotes));
        reconciler.merge(remote);
        let (quotes, result) = reconciler.finish();
        self.quotes = quotes;
        self.revalidate_selection();
        result
    }

    /// Import a JSON file's contents using the same merge rule as sync.
    ///
    /// Nothing changes unless at least one entry is valid.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary> {
        let batch = parse_import(json)?;
        let accepted = batch.quotes.len();
        let result = self.merge_remote(batch.quotes);

        Ok(ImportSummary {
            accepted,
            skipped: batch.skipped,
            result,
        })
    }

    /// Export the full collection as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        encode_quotes_pretty(&self.quotes)
    }
}
