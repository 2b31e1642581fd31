//! Error types for the API server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Api Error Enum ==
/// Unified error type returned by route handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested document does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Unique constraint violated
    #[error("{0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Store Error Enum ==
/// Failure talking to the key-value store.
///
/// Never rendered over HTTP: the cache layer logs it and degrades.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection, timeout or protocol error from Redis
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// `SETEX` called with a zero TTL
    #[error("invalid expire time in 'setex' command")]
    InvalidExpireTime,
}

// == Result Type Aliases ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result type for key-value store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
