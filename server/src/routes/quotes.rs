//! Quote endpoint routes.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use quotesync_engine::{ImportSummary, Quote};

use crate::error::Result;
use crate::handlers::{
    add_quote, export_quotes, import_quotes, last_quote, list_categories, list_quotes,
    random_quote, select_category, AddQuoteRequest, CategoriesResponse, QuoteListResponse,
    SelectCategoryRequest,
};
use crate::AppState;

/// Create quote routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list_handler).post(add_handler))
        .route("/quotes/random", get(random_handler))
        .route("/quotes/last", get(last_handler))
        .route("/quotes/import", post(import_handler))
        .route("/quotes/export", get(export_handler))
        .route("/categories", get(categories_handler))
        .route("/categories/selected", put(select_handler))
}

/// GET /quotes - Quotes under the current filter.
async fn list_handler(State(state): State<AppState>) -> Json<QuoteListResponse> {
    Json(list_quotes(&state).await)
}

/// POST /quotes - Add a quote.
async fn add_handler(
    State(state): State<AppState>,
    Json(request): Json<AddQuoteRequest>,
) -> Result<Json<Quote>> {
    let quote = add_quote(&state, request).await?;
    Ok(Json(quote))
}

/// GET /quotes/random - Show a random quote.
async fn random_handler(State(state): State<AppState>) -> Result<Json<Quote>> {
    let quote = random_quote(&state).await?;
    Ok(Json(quote))
}

/// GET /quotes/last - The last quote shown in this session.
async fn last_handler(State(state): State<AppState>) -> Result<Json<Quote>> {
    let quote = last_quote(&state).await?;
    Ok(Json(quote))
}

/// POST /quotes/import - Merge an uploaded JSON file.
async fn import_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportSummary>> {
    let summary = import_quotes(&state, &body).await?;
    Ok(Json(summary))
}

/// GET /quotes/export - Download the collection.
async fn export_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let json = export_quotes(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"quotes.json\""),
        ],
        json,
    ))
}

/// GET /categories - Known categories.
async fn categories_handler(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(list_categories(&state).await)
}

/// PUT /categories/selected - Change the category filter.
async fn select_handler(
    State(state): State<AppState>,
    Json(request): Json<SelectCategoryRequest>,
) -> Result<Json<CategoriesResponse>> {
    let response = select_category(&state, request).await?;
    Ok(Json(response))
}
