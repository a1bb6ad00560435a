//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Whether retrying the same call may succeed
    ///
    /// Only network, timeout, database and busy errors qualify. Validation and
    /// not-found errors are final.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NetworkError
                | ErrorCode::TimeoutError
                | ErrorCode::DatabaseError
                | ErrorCode::SystemBusy
        )
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, after_ms: u64) -> Self {
        let op = operation.into();
        Self::with_message(
            ErrorCode::TimeoutError,
            format!("{op} timed out after {after_ms}ms"),
        )
        .with_detail("operation", op)
        .with_detail("timeout_ms", after_ms)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Create an invalid postal code error
    pub fn invalid_postal_code(raw: impl Into<String>) -> Self {
        Self::new(ErrorCode::PostalCodeInvalid).with_detail("postal_code", raw.into())
    }

    /// Create an invalid zone value error
    pub fn invalid_zone_value(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ZoneValueInvalid, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "zone_value")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "zone_value");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_transient_classification() {
        assert!(AppError::network("connection reset").is_transient());
        assert!(AppError::timeout("zones.list_active", 8000).is_transient());
        assert!(AppError::database("locked").is_transient());
        assert!(!AppError::validation("bad").is_transient());
        assert!(!AppError::not_found("Zone").is_transient());
        assert!(!AppError::invalid_postal_code("123").is_transient());
    }

    #[test]
    fn test_timeout_message() {
        let err = AppError::timeout("postal.get", 5000);
        assert_eq!(err.message, "postal.get timed out after 5000ms");
        assert_eq!(err.details.unwrap().get("timeout_ms").unwrap(), 5000);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::ZoneNotFound, "Zone 7 not found");
        assert_eq!(format!("{}", err), "Zone 7 not found");
    }
}
