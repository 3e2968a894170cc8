//! Unified error handling for the registry service.
//!
//! Provides a unified `AppError` type mapped onto HTTP status codes. All
//! route handlers return `Result<T, AppError>`. Identity and validation
//! failures are raised before any store mutation, so an error response never
//! leaves a partial effect behind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the registry.
#[derive(Debug, Error)]
pub enum AppError {
    /// A write that requires a pre-existing identifier did not receive one.
    #[error("a {0} must carry an id for this operation")]
    IdentityMissing(&'static str),

    /// Path and body identifiers disagree.
    #[error("path id {path} does not match body id {body}")]
    IdentityMismatch { path: i64, body: i64 },

    /// A creation request supplied an identifier.
    #[error("a new {0} cannot already have an id")]
    IdentityPreset(&'static str),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required field is absent or malformed, or a reference is invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniqueness constraint would be violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The underlying store operation could not complete.
    #[error("store error: {0}")]
    Store(StoreError),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("entity not found".to_owned()),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::InvalidReference(msg) => Self::Validation(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Store(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::IdentityMissing(_)
            | Self::IdentityMismatch { .. }
            | Self::IdentityPreset(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
