//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`]. The set of
//! kinds is closed: every failure a caller can observe is one of five variants,
//! and each one maps to exactly one HTTP status.
//!
//! ## Error Categories
//!
//! | Variant | Status | Raised when |
//! |---|---|---|
//! | [`BadInput`](AppError::BadInput) | 400 | validation or parse failure |
//! | [`NotFound`](AppError::NotFound) | 404 | missing row or dangling reference |
//! | [`Conflict`](AppError::Conflict) | 409 | uniqueness violation |
//! | [`Unauthorized`](AppError::Unauthorized) | 401 | bad credentials or token |
//! | [`Internal`](AppError::Internal) | 500 | storage, hashing, or signing fault |
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_limit(raw: &str) -> Result<i64> {
//!     raw.parse()
//!         .map_err(|_| AppError::BadInput("limit must be an integer".to_string()))
//! }
//! ```
//!
//! ## Error Conversion
//!
//! - `From<sqlx::Error>` - unique violations become `Conflict`, foreign key
//!   violations and missing rows become `NotFound`, the rest `Internal`
//! - `From<AuthError>` - token rejections become `Unauthorized`, the rest `Internal`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lib_auth::AuthError;
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation or could not be parsed.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    BadInput(String),

    /// Requested resource, or a resource it references, does not exist.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule was violated (e.g. username already taken).
    ///
    /// **HTTP Status**: 409 Conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials or token were rejected.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Unexpected failure. Details are logged, never returned to the caller.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::BadInput(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg) => msg.clone(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadInput(_) => "BadInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Conflict(_) => "Conflict",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Resource already exists".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Referenced resource not found".to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert `AuthError` to `AppError`.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_token_rejection() {
            AppError::Unauthorized("Invalid or expired token".to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Internal("disk I/O error at page 7".to_string());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(AppError::from(AuthError::TokenExpired), AppError::Unauthorized(_)));
        assert!(matches!(
            AppError::from(AuthError::TokenInvalid("bad".into())),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::Hash("params".into())),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(AppError::from(sqlx::Error::RowNotFound), AppError::NotFound(_)));
    }
}
