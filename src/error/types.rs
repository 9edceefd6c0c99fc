/**
 * API Error Types
 *
 * This module defines the error taxonomy for the HTTP API. Each variant
 * carries a human-readable message and maps to exactly one HTTP status
 * code. Handlers return `Result<_, ApiError>` and rely on the
 * `IntoResponse` implementation in `conversion.rs` to produce the JSON
 * error body.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Error taxonomy for every handler-level failure
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or duplicate input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired identity token (401)
    #[error("{0}")]
    Unauthenticated(String),

    /// Acting on another user's owned resource (403)
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Unexpected store or runtime failure (500). The message is
    /// internal detail; clients receive a generic body.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed in the response body
    ///
    /// Internal failures answer with a generic message; the underlying
    /// cause is logged, never returned to the client.
    pub fn public_message(&self) -> &str {
        match self {
            Self::Internal(_) => "Internal server error",
            Self::Validation(msg)
            | Self::Unauthenticated(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg) => msg,
        }
    }
}
