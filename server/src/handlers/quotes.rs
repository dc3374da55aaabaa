//! Quote handlers - display, add and filter.

use quotesync_engine::{CategoryFilter, Quote};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::AppState;

/// Quotes visible under the current filter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteListResponse {
    pub quotes: Vec<Quote>,
    pub selected: CategoryFilter,
}

/// Request body for adding a quote.
///
/// Missing fields deserialize as blank and are rejected by the engine.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuoteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
}

/// Known categories and the current selection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub selected: CategoryFilter,
}

/// Request body for changing the category filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCategoryRequest {
    pub category: String,
}

const NO_QUOTES: &str = "No quotes available.";

/// List quotes under the current filter.
pub async fn list_quotes(state: &AppState) -> QuoteListResponse {
    let book = state.book.lock().await;
    QuoteListResponse {
        quotes: book.filtered().into_iter().cloned().collect(),
        selected: book.selected_category().clone(),
    }
}

/// Pick a random quote under the current filter and remember it.
pub async fn random_quote(state: &AppState) -> Result<Quote> {
    let quote = {
        let book = state.book.lock().await;
        book.pick(rand::random::<usize>())
            .cloned()
            .ok_or_else(|| AppError::NotFound(NO_QUOTES.to_string()))?
    };

    *state.last_shown.write().await = Some(quote.clone());
    Ok(quote)
}

/// The quote most recently handed out by [`random_quote`].
pub async fn last_quote(state: &AppState) -> Result<Quote> {
    state
        .last_shown
        .read()
        .await
        .clone()
        .ok_or_else(|| AppError::NotFound("No quote shown yet".to_string()))
}

/// Add a quote and persist the collection.
pub async fn add_quote(state: &AppState, request: AddQuoteRequest) -> Result<Quote> {
    let mut book = state.book.lock().await;

    let mut updated = book.clone();
    let quote = updated.add(&request.text, &request.category)?.clone();
    state.store.save_quotes(&updated).await?;
    *book = updated;

    tracing::info!(category = %quote.category, total = book.len(), "Quote added");
    Ok(quote)
}

/// Known categories with the current selection.
pub async fn list_categories(state: &AppState) -> CategoriesResponse {
    let book = state.book.lock().await;
    CategoriesResponse {
        categories: book.categories(),
        selected: book.selected_category().clone(),
    }
}

/// Change the category filter and persist it.
pub async fn select_category(
    state: &AppState,
    request: SelectCategoryRequest,
) -> Result<CategoriesResponse> {
    let mut book = state.book.lock().await;

    let mut updated = book.clone();
    updated.select_category(CategoryFilter::parse(&request.category))?;
    state.store.save_selection(&updated).await?;
    *book = updated;

    tracing::debug!(selected = %book.selected_category(), "Category filter changed");

    Ok(CategoriesResponse {
        categories: book.categories(),
        selected: book.selected_category().clone(),
    })
}
