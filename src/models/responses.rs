//! Response DTOs for the API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::User;

/// Plain confirmation body, e.g. `{"message":"Product deleted"}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for register and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// The authenticated account
    pub user: User,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
}

impl HealthResponse {
    /// Creates the response reported while the server is up
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
