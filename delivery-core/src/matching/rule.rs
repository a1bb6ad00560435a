//! Zone Rule
//!
//! Typed form of a `(zone_type, zone_value)` pair. Parsing validates the value
//! format; matching is pure and needs no I/O once the customer location is known.

use shared::error::AppError;
use shared::models::{POSTAL_CODE_LEN, PostalCode, PostalLocation, ZoneType};
use thiserror::Error;

/// Why a zone value cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneConfigError {
    #[error("postal code must have 8 digits, got {0:?}")]
    InvalidCode(String),

    #[error("range must be \"NNNNNNNN-NNNNNNNN\", got {0:?}")]
    MalformedRange(String),

    #[error("range start {start} is after end {end}")]
    InvertedRange { start: String, end: String },

    #[error("{0} zone value is empty")]
    EmptyValue(ZoneType),

    #[error("unsupported zone type {0:?}")]
    UnknownType(String),
}

impl From<ZoneConfigError> for AppError {
    fn from(err: ZoneConfigError) -> Self {
        AppError::invalid_zone_value(err.to_string())
    }
}

/// Parsed zone descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneRule {
    ExactCode(PostalCode),
    /// Inclusive numeric range, `start <= end`
    CodeRange { start: u32, end: u32 },
    /// Compared case-sensitively
    RegionCode(String),
    /// Stored lowercased, compared case-insensitively
    City(String),
}

impl ZoneRule {
    /// Parse a zone value according to its type
    pub fn parse(zone_type: ZoneType, zone_value: &str) -> Result<Self, ZoneConfigError> {
        let value = zone_value.trim();
        match zone_type {
            ZoneType::ExactCode => PostalCode::parse(value)
                .map(Self::ExactCode)
                .map_err(|_| ZoneConfigError::InvalidCode(zone_value.to_string())),
            ZoneType::CodeRange => parse_range(value),
            ZoneType::RegionCode => {
                if value.is_empty() {
                    return Err(ZoneConfigError::EmptyValue(zone_type));
                }
                Ok(Self::RegionCode(value.to_string()))
            }
            ZoneType::City => {
                if value.is_empty() {
                    return Err(ZoneConfigError::EmptyValue(zone_type));
                }
                Ok(Self::City(value.to_lowercase()))
            }
        }
    }

    /// Parse with the zone type still in its stored string form
    pub fn parse_raw(zone_type: &str, zone_value: &str) -> Result<Self, ZoneConfigError> {
        let zone_type: ZoneType = zone_type
            .parse()
            .map_err(|_| ZoneConfigError::UnknownType(zone_type.to_string()))?;
        Self::parse(zone_type, zone_value)
    }

    pub fn zone_type(&self) -> ZoneType {
        match self {
            Self::ExactCode(_) => ZoneType::ExactCode,
            Self::CodeRange { .. } => ZoneType::CodeRange,
            Self::RegionCode(_) => ZoneType::RegionCode,
            Self::City(_) => ZoneType::City,
        }
    }

    /// City and region rules need the customer's location
    pub fn requires_lookup(&self) -> bool {
        self.zone_type().requires_lookup()
    }

    /// Whether `customer` falls in this zone
    ///
    /// `location` is only consulted by city / region rules; `None` means the
    /// lookup failed or found nothing, which never matches.
    pub fn matches(&self, customer: &PostalCode, location: Option<&PostalLocation>) -> bool {
        match self {
            Self::ExactCode(code) => code == customer,
            Self::CodeRange { start, end } => (*start..=*end).contains(&customer.value()),
            Self::RegionCode(region) => location.is_some_and(|l| l.region_code.trim() == region),
            Self::City(city) => location.is_some_and(|l| l.city.trim().to_lowercase() == *city),
        }
    }
}

/// "NNNNNNNN-NNNNNNNN": exactly two parts, 8 digits each, start <= end
fn parse_range(value: &str) -> Result<ZoneRule, ZoneConfigError> {
    let parts: Vec<&str> = value.split('-').map(str::trim).collect();
    let [start, end] = parts.as_slice() else {
        return Err(ZoneConfigError::MalformedRange(value.to_string()));
    };
    if !is_code_digits(start) || !is_code_digits(end) {
        return Err(ZoneConfigError::MalformedRange(value.to_string()));
    }

    let (Ok(start_value), Ok(end_value)) = (start.parse::<u32>(), end.parse::<u32>()) else {
        return Err(ZoneConfigError::MalformedRange(value.to_string()));
    };
    if start_value > end_value {
        return Err(ZoneConfigError::InvertedRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(ZoneRule::CodeRange {
        start: start_value,
        end: end_value,
    })
}

fn is_code_digits(part: &str) -> bool {
    part.len() == POSTAL_CODE_LEN && part.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a zone value before it is written
pub fn validate_zone_value(zone_type: ZoneType, zone_value: &str) -> Result<(), ZoneConfigError> {
    ZoneRule::parse(zone_type, zone_value).map(|_| ())
}
