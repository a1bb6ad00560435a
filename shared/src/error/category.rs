//! Error category classification

use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Postal code errors
/// - 2xxx: Delivery zone errors
/// - 3xxx: Product restriction errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Postal code errors (1xxx)
    Postal,
    /// Delivery zone errors (2xxx)
    Zone,
    /// Product restriction errors (3xxx)
    Restriction,
    /// System errors (everything else, 9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Postal,
            2000..3000 => Self::Zone,
            3000..4000 => Self::Restriction,
            _ => Self::System,
        }
    }

    /// Category name as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Postal => "postal",
            Self::Zone => "zone",
            Self::Restriction => "restriction",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Postal);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::Zone);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Restriction);
        assert_eq!(ErrorCategory::from_code(9004), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::ZoneFeeInvalid.category(), ErrorCategory::Zone);
    }
}
