//! Postal Code Model (CEP)

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a normalized postal code
pub const POSTAL_CODE_LEN: usize = 8;

/// Strip every non-digit character ("01310-100" -> "01310100")
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalized 8-digit postal code
///
/// Accepts "NNNNNNNN" or any punctuated form; formatting is discarded on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse and normalize a postal code
    pub fn parse(raw: &str) -> AppResult<Self> {
        let digits = strip_non_digits(raw);
        if digits.len() != POSTAL_CODE_LEN {
            return Err(AppError::invalid_postal_code(raw));
        }
        Ok(Self(digits))
    }

    /// The 8 digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value used by range comparisons
    pub fn value(&self) -> u32 {
        // 8 ASCII digits always fit in u32 (max 99_999_999)
        self.0
            .bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
    }

    /// Display form "NNNNN-NNN"
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for PostalCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// City / region resolved for a postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalLocation {
    pub city: String,
    /// IBGE municipality code
    pub region_code: String,
}

/// Postal code lookup table row (filled by the geocoding cache, read-only here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PostalCodeRecord {
    pub postal_code: String,
    pub city: String,
    pub region_code: String,
}

impl PostalCodeRecord {
    pub fn location(&self) -> PostalLocation {
        PostalLocation {
            city: self.city.clone(),
            region_code: self.region_code.clone(),
        }
    }
}

impl From<PostalCodeRecord> for PostalLocation {
    fn from(record: PostalCodeRecord) -> Self {
        Self {
            city: record.city,
            region_code: record.region_code,
        }
    }
}
