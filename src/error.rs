//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::backend::StoreError;
use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for cache operations and the HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache (HTTP surface only; `get` reports a miss as `None`)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backing store stayed full after every other entry was evicted
    #[error("Storage full while writing '{key}': {source}")]
    StorageFull {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Backing store failure unrelated to capacity
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Entry could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::StorageFull { .. } => StatusCode::INSUFFICIENT_STORAGE,
            CacheError::Store(_) | CacheError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
