//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StoreError;
use crate::sync::SyncError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] quotesync_engine::Error),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                    None,
                )
            }
            AppError::Engine(e @ quotesync_engine::Error::Serialization(_)) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Serialization error".to_string(),
                    None,
                )
            }
            AppError::Engine(e) => {
                tracing::debug!("Rejected input: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string(), None)
            }
            AppError::Sync(SyncError::Busy) => (
                StatusCode::CONFLICT,
                "Sync already in progress".to_string(),
                None,
            ),
            AppError::Sync(SyncError::Fetch(e)) => (
                StatusCode::BAD_GATEWAY,
                "Could not reach the quote server".to_string(),
                Some(e.to_string()),
            ),
            AppError::Sync(SyncError::Storage(e)) => {
                tracing::error!("Storage error during sync: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                    None,
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
