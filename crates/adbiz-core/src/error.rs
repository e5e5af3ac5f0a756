//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Adbiz.
///
/// The store-facing variants mirror the failure taxonomy of the relationship
/// ledger and the entity cache: `NotFound`, `Conflict` (a write hit a
/// uniqueness constraint), `Transaction` (commit/rollback or connectivity
/// failure inside a store transaction) and `Cache` (the cache client could
/// not serve the request).
#[derive(Error, Debug)]
pub enum AdbizError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict on write (uniqueness constraint violated)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller may not act on the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // ============ Infrastructure Errors ============
    /// Store transaction could not be completed
    #[error("Transaction failure: {0}")]
    Transaction(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Cache client error
    #[error("Cache unavailable: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdbizError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Forbidden(_) => 403,
            Self::Transaction(_) | Self::Cache(_) => 503,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Transaction(_) => "TRANSACTION_FAILURE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    ///
    /// Follow operations are idempotent, so a caller may replay the whole
    /// operation after a transient store or cache failure.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Transaction(_) | Self::Database(_) | Self::Cache(_)
        )
    }

    /// Checks if this error means "the resource does not exist".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AdbizError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AdbizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from an `AdbizError`.
    #[must_use]
    pub fn from_error(error: &AdbizError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&AdbizError> for ErrorResponse {
    fn from(error: &AdbizError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AdbizError::not_found("User", 1).status_code(), 404);
        assert_eq!(AdbizError::validation("invalid mobile").status_code(), 400);
        assert_eq!(AdbizError::forbidden("not the owner").status_code(), 403);
        assert_eq!(AdbizError::conflict("duplicate").status_code(), 409);
        assert_eq!(AdbizError::Transaction("deadlock".to_string()).status_code(), 503);
        assert_eq!(AdbizError::cache("down").status_code(), 503);
        assert_eq!(AdbizError::Database("db error".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AdbizError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(AdbizError::conflict("dup").error_code(), "CONFLICT");
        assert_eq!(
            AdbizError::Transaction("t".to_string()).error_code(),
            "TRANSACTION_FAILURE"
        );
        assert_eq!(AdbizError::cache("c").error_code(), "CACHE_UNAVAILABLE");
        assert_eq!(AdbizError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(AdbizError::Transaction("connection lost".to_string()).is_retriable());
        assert!(AdbizError::Database("busy".to_string()).is_retriable());
        assert!(AdbizError::cache("timeout").is_retriable());
        assert!(!AdbizError::not_found("User", 1).is_retriable());
        assert!(!AdbizError::conflict("dup").is_retriable());
        assert!(!AdbizError::validation("bad input").is_retriable());
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(AdbizError::not_found("User", "9998887777").is_not_found());
        assert!(!AdbizError::cache("miss").is_not_found());
    }

    #[test]
    fn test_error_constructors() {
        let not_found = AdbizError::not_found("User", "123");
        assert!(not_found.to_string().contains("User"));
        assert!(not_found.to_string().contains("123"));

        let conflict = AdbizError::conflict("duplicate entry");
        assert!(conflict.to_string().contains("duplicate entry"));

        let forbidden = AdbizError::forbidden("no perms");
        assert!(forbidden.to_string().contains("no perms"));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = AdbizError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = AdbizError::validation("bad input");
        let details = vec![FieldError {
            field: "mobile_number".to_string(),
            message: "Invalid mobile number".to_string(),
            code: "INVALID_MOBILE".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
