//! Typed error handling for the quill service
//!
//! The domain layer raises a small closed set of error kinds. Each kind maps
//! to exactly one HTTP status, so the boundary never has to guess:
//!
//! - [`AppError::NotFound`] → 404
//! - [`AppError::Conflict`] → 409
//! - [`AppError::Validation`] → 422
//! - [`AppError::Unauthorized`] → 401
//! - [`AppError::Database`] → 500
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.get(42).await {
//!     Ok(user) => println!("found {}", user.username),
//!     Err(AppError::NotFound(msg)) => println!("{msg}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::store::StoreError;

/// The closed error taxonomy for all controller operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// An identity lookup failed
    NotFound(String),

    /// A uniqueness or duplicate-association precondition failed
    Conflict(String),

    /// Supplied input failed domain validation
    Validation(String),

    /// The caller lacks permission for the operation
    Unauthorized(String),

    /// An unexpected persistence-layer failure; the unit of work was
    /// abandoned before the error was raised
    Database(String),
}

impl AppError {
    /// Standard message for a failed lookup by id
    pub fn not_found(resource: &str, id: i64) -> Self {
        AppError::NotFound(format!("{resource} with id {id} not found"))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Convert to the wire-format error body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Database(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// A specialized Result type for controller operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = AppError::not_found("User", 42);
        assert_eq!(err.to_string(), "User with id 42 not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::not_found("User", 1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("duplicate".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation("bad input".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Unauthorized("nope".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict("x".into()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::Validation("x".into()).error_code(),
            "VALIDATION_FAILED"
        );
    }

    #[test]
    fn test_error_response_body() {
        let err = AppError::Conflict("Category with name 'rust' already exists".to_string());
        let body = err.to_response();
        assert_eq!(body.code, "CONFLICT");
        assert!(body.message.contains("already exists"));
    }

    #[test]
    fn test_from_store_error() {
        let err: AppError = StoreError::LockPoisoned("test".to_string()).into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
