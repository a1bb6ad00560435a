//! Unified error codes for the delivery workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Postal code errors
//! - 2xxx: Delivery zone errors
//! - 3xxx: Product restriction errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Postal code ====================
    /// Postal code does not have 8 digits
    PostalCodeInvalid = 1001,
    /// Postal code unknown to the lookup store
    PostalCodeNotFound = 1002,
    /// Geocoding provider returned an unusable payload
    PostalLookupFailed = 1003,

    // ==================== 2xxx: Delivery zone ====================
    /// Delivery zone not found
    ZoneNotFound = 2001,
    /// Zone value does not match its zone type
    ZoneValueInvalid = 2002,
    /// Zone type is not one of the supported kinds
    ZoneTypeInvalid = 2003,
    /// Delivery fee is negative or not finite
    ZoneFeeInvalid = 2004,

    // ==================== 3xxx: Product restriction ====================
    /// Product restriction not found
    RestrictionNotFound = 3001,
    /// Restriction type is not one of the supported kinds
    RestrictionTypeInvalid = 3002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Store temporarily unavailable
    SystemBusy = 9006,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Postal code
            ErrorCode::PostalCodeInvalid => "Postal code must have 8 digits",
            ErrorCode::PostalCodeNotFound => "Postal code not found",
            ErrorCode::PostalLookupFailed => "Postal code lookup failed",

            // Delivery zone
            ErrorCode::ZoneNotFound => "Delivery zone not found",
            ErrorCode::ZoneValueInvalid => "Zone value does not match zone type",
            ErrorCode::ZoneTypeInvalid => "Unsupported zone type",
            ErrorCode::ZoneFeeInvalid => "Delivery fee must be a non-negative number",

            // Product restriction
            ErrorCode::RestrictionNotFound => "Product restriction not found",
            ErrorCode::RestrictionTypeInvalid => "Unsupported restriction type",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }

    /// Category derived from the code range
    pub fn category(&self) -> super::ErrorCategory {
        super::ErrorCategory::from_code(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Postal code
            1001 => Ok(ErrorCode::PostalCodeInvalid),
            1002 => Ok(ErrorCode::PostalCodeNotFound),
            1003 => Ok(ErrorCode::PostalLookupFailed),

            // Delivery zone
            2001 => Ok(ErrorCode::ZoneNotFound),
            2002 => Ok(ErrorCode::ZoneValueInvalid),
            2003 => Ok(ErrorCode::ZoneTypeInvalid),
            2004 => Ok(ErrorCode::ZoneFeeInvalid),

            // Product restriction
            3001 => Ok(ErrorCode::RestrictionNotFound),
            3002 => Ok(ErrorCode::RestrictionTypeInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_through_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::PostalCodeInvalid,
            ErrorCode::ZoneValueInvalid,
            ErrorCode::RestrictionTypeInvalid,
            ErrorCode::TimeoutError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_display_is_padded() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::TimeoutError.to_string(), "E9004");
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::ZoneValueInvalid).unwrap();
        assert_eq!(json, "2002");
        let code: ErrorCode = serde_json::from_str("1001").unwrap();
        assert_eq!(code, ErrorCode::PostalCodeInvalid);
    }
}
