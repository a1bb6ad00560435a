//! Delivery Zone Model

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a zone value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    /// Single postal code, "01310100"
    ExactCode,
    /// Inclusive range, "01000000-01999999"
    CodeRange,
    /// IBGE municipality code, "4106902"
    RegionCode,
    /// City name, "Curitiba"
    City,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactCode => "exact_code",
            Self::CodeRange => "code_range",
            Self::RegionCode => "region_code",
            Self::City => "city",
        }
    }

    /// City and region zones need the postal code lookup
    pub fn requires_lookup(&self) -> bool {
        matches!(self, Self::RegionCode | Self::City)
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact_code" => Ok(Self::ExactCode),
            "code_range" => Ok(Self::CodeRange),
            "region_code" => Ok(Self::RegionCode),
            "city" => Ok(Self::City),
            other => Err(AppError::with_message(
                ErrorCode::ZoneTypeInvalid,
                format!("Unsupported zone type: {other}"),
            )),
        }
    }
}

/// Delivery zone entity (商家配送区域)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: i64,
    pub vendor_id: i64,
    pub zone_name: String,
    pub zone_type: ZoneType,
    pub zone_value: String,
    /// Delivery fee (0 = free local delivery)
    pub delivery_fee: f64,
    /// Free-form estimate shown to the customer, e.g. "24h"
    pub delivery_time: String,
    pub active: bool,
    pub created_at: i64,
}

/// Create delivery zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryZoneCreate {
    pub vendor_id: i64,
    pub zone_name: String,
    pub zone_type: ZoneType,
    pub zone_value: String,
    pub delivery_fee: f64,
    pub delivery_time: String,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_type_str_roundtrip() {
        for t in [
            ZoneType::ExactCode,
            ZoneType::CodeRange,
            ZoneType::RegionCode,
            ZoneType::City,
        ] {
            assert_eq!(t.as_str().parse::<ZoneType>().unwrap(), t);
        }
    }

    #[test]
    fn test_zone_type_unknown() {
        let err = "neighbourhood".parse::<ZoneType>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ZoneTypeInvalid);
    }

    #[test]
    fn test_zone_type_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ZoneType::CodeRange).unwrap(),
            "\"code_range\""
        );
    }

    #[test]
    fn test_requires_lookup() {
        assert!(ZoneType::City.requires_lookup());
        assert!(ZoneType::RegionCode.requires_lookup());
        assert!(!ZoneType::ExactCode.requires_lookup());
        assert!(!ZoneType::CodeRange.requires_lookup());
    }
}
