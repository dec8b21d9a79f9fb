//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the crate returns [`AppError`]. Handlers return it
//! directly and rely on the [`IntoResponse`] impl to produce `{"error": "<message>"}`
//! with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error kinds surfaced by services, repositories and handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input. Never retried.
    #[error("{message}")]
    Validation { message: String },

    /// Short code absent or expired. Terminal.
    #[error("{message}")]
    NotFound { message: String },

    /// Store-level uniqueness violation on insert.
    #[error("{message}")]
    Conflict { message: String },

    /// The short code retry loop ran out of attempts.
    #[error("{message}")]
    Exhausted { message: String },

    /// Store transport failure or an elapsed request deadline.
    #[error("{message}")]
    Unavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn exhausted(message: impl Into<String>) -> Self {
        Self::Exhausted {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status used when this error reaches the transport layer.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Exhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Whether the same request may succeed if issued again.
    ///
    /// Only conflicts and infrastructure failures qualify. Validation,
    /// not-found and exhausted code attempts are final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Conflict { .. } | AppError::Unavailable { .. }
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => {
                tracing::error!("Database unavailable: {}", e);
                AppError::unavailable("Database unavailable")
            }
            other => {
                tracing::error!("Database error: {}", other);
                AppError::internal("Database error")
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::exhausted("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::unavailable("x").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::not_found("Short URL not found.");
        assert_eq!(err.to_string(), "Short URL not found.");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(AppError::conflict("x").is_retryable());
        assert!(AppError::unavailable("x").is_retryable());
        assert!(!AppError::not_found("x").is_retryable());
        assert!(!AppError::bad_request("x").is_retryable());
        assert!(!AppError::exhausted("x").is_retryable());
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Unavailable { .. }));
    }

    #[test]
    fn test_row_not_found_maps_to_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
