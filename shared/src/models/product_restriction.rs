//! Product Restriction Model

use super::delivery_zone::ZoneType;
use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Effect of a matching restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    /// Product is not delivered to the zone
    NotDelivered,
    /// Freight quoted on request
    FreightOnDemand,
    /// Delivery allowed with a higher fee
    HigherFee,
}

impl RestrictionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotDelivered => "not_delivered",
            Self::FreightOnDemand => "freight_on_demand",
            Self::HigherFee => "higher_fee",
        }
    }

    /// Only `not_delivered` blocks delivery
    pub fn allows_delivery(&self) -> bool {
        !matches!(self, Self::NotDelivered)
    }

    /// Message shown when the vendor left `restriction_message` empty
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::NotDelivered => "This product is not delivered to your region",
            Self::FreightOnDemand => "Freight for your region is quoted on request",
            Self::HigherFee => "A higher delivery fee applies to your region",
        }
    }
}

impl fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestrictionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_delivered" => Ok(Self::NotDelivered),
            "freight_on_demand" => Ok(Self::FreightOnDemand),
            "higher_fee" => Ok(Self::HigherFee),
            other => Err(AppError::with_message(
                ErrorCode::RestrictionTypeInvalid,
                format!("Unsupported restriction type: {other}"),
            )),
        }
    }
}

/// Product restriction entity (商品配送限制)
///
/// Overrides the vendor's delivery zones for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRestriction {
    pub id: i64,
    pub vendor_id: i64,
    pub product_id: i64,
    pub zone_type: ZoneType,
    pub zone_value: String,
    pub restriction_type: RestrictionType,
    pub restriction_message: String,
    pub active: bool,
    pub created_at: i64,
}

impl ProductRestriction {
    /// Vendor message, or the type default when blank
    pub fn display_message(&self) -> String {
        let msg = self.restriction_message.trim();
        if msg.is_empty() {
            self.restriction_type.default_message().to_string()
        } else {
            msg.to_string()
        }
    }
}

/// Create product restriction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRestrictionCreate {
    pub vendor_id: i64,
    pub product_id: i64,
    pub zone_type: ZoneType,
    pub zone_value: String,
    pub restriction_type: RestrictionType,
    pub restriction_message: Option<String>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restriction(message: &str) -> ProductRestriction {
        ProductRestriction {
            id: 1,
            vendor_id: 1,
            product_id: 1,
            zone_type: ZoneType::City,
            zone_value: "Curitiba".into(),
            restriction_type: RestrictionType::HigherFee,
            restriction_message: message.into(),
            active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_allows_delivery() {
        assert!(!RestrictionType::NotDelivered.allows_delivery());
        assert!(RestrictionType::FreightOnDemand.allows_delivery());
        assert!(RestrictionType::HigherFee.allows_delivery());
    }

    #[test]
    fn test_display_message_falls_back_to_default() {
        assert_eq!(
            restriction("   ").display_message(),
            RestrictionType::HigherFee.default_message()
        );
        assert_eq!(restriction(" Extra R$ 20 ").display_message(), "Extra R$ 20");
    }

    #[test]
    fn test_restriction_type_parse() {
        assert_eq!(
            "freight_on_demand".parse::<RestrictionType>().unwrap(),
            RestrictionType::FreightOnDemand
        );
        assert_eq!(
            "blocked".parse::<RestrictionType>().unwrap_err().code,
            ErrorCode::RestrictionTypeInvalid
        );
    }
}
