//! Import and export of the quote collection as JSON files.

use quotesync_engine::ImportSummary;

use crate::error::Result;
use crate::AppState;

/// Merge an uploaded JSON file into the collection and persist it.
///
/// Entries that fail shape-checking are dropped; if none survive, the
/// collection is left as it was.
pub async fn import_quotes(state: &AppState, body: &str) -> Result<ImportSummary> {
    let mut book = state.book.lock().await;

    let mut updated = book.clone();
    let summary = updated.import_json(body)?;
    state.store.save_quotes(&updated).await?;
    if updated.selected_category() != book.selected_category() {
        state.store.save_selection(&updated).await?;
    }
    *book = updated;

    tracing::info!(
        accepted = summary.accepted,
        skipped = summary.skipped,
        added = summary.result.added,
        updated = summary.result.updated,
        "Quotes imported"
    );

    Ok(summary)
}

/// Pretty-printed JSON of the full collection.
pub async fn export_quotes(state: &AppState) -> Result<String> {
    let book = state.book.lock().await;
    Ok(book.export_json()?)
}
