//! Delivery Decision Model
//!
//! Output of the delivery resolution, never persisted.

use super::RestrictionType;
use crate::util::{format_fee, to_decimal};
use serde::{Deserialize, Serialize};

/// Message for a matched zone with zero fee
pub const LOCAL_FREE_MESSAGE: &str = "Free local delivery";
/// Message when no zone matches or the zone data is unavailable
pub const FALLBACK_MESSAGE: &str = "Delivery fee calculated at checkout";
/// Estimated time when no zone matches
pub const FALLBACK_TIME: &str = "Communicated after order confirmation";
/// Message when no postal code was supplied
pub const PROMPT_MESSAGE: &str = "Enter your postal code to check delivery";

/// Delivery decision returned to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDecision {
    pub is_local: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    pub has_restriction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_type: Option<RestrictionType>,
    pub delivery_available: bool,
}

impl DeliveryDecision {
    /// No zone matched, fee reconciled downstream at checkout
    pub fn fallback() -> Self {
        Self {
            is_local: false,
            message: FALLBACK_MESSAGE.to_string(),
            estimated_time: Some(FALLBACK_TIME.to_string()),
            delivery_fee: None,
            has_restriction: false,
            restriction_type: None,
            delivery_available: true,
        }
    }

    /// Ask the customer for a postal code, optionally with a zone summary
    pub fn prompt(zone_summary: Option<&str>) -> Self {
        let message = match zone_summary {
            Some(summary) if !summary.is_empty() => format!("{PROMPT_MESSAGE}. {summary}"),
            _ => PROMPT_MESSAGE.to_string(),
        };
        Self {
            is_local: false,
            message,
            estimated_time: None,
            delivery_fee: None,
            has_restriction: false,
            restriction_type: None,
            delivery_available: true,
        }
    }

    /// A vendor zone matched
    pub fn zone_match(delivery_fee: f64, delivery_time: &str) -> Self {
        let fee = to_decimal(delivery_fee);
        let is_local = fee.is_zero();
        let message = if is_local {
            LOCAL_FREE_MESSAGE.to_string()
        } else {
            format!("Delivery fee: {}", format_fee(fee))
        };
        Self {
            is_local,
            message,
            estimated_time: Some(delivery_time.to_string()),
            delivery_fee: Some(delivery_fee),
            has_restriction: false,
            restriction_type: None,
            delivery_available: true,
        }
    }

    /// A product restriction matched
    pub fn restricted(restriction_type: RestrictionType, message: impl Into<String>) -> Self {
        Self {
            is_local: false,
            message: message.into(),
            estimated_time: None,
            delivery_fee: None,
            has_restriction: true,
            restriction_type: Some(restriction_type),
            delivery_available: restriction_type.allows_delivery(),
        }
    }

    /// Whether this is the generic fallback
    pub fn is_fallback(&self) -> bool {
        !self.has_restriction && self.delivery_fee.is_none() && self.message == FALLBACK_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_match_free_is_local() {
        let d = DeliveryDecision::zone_match(0.0, "24h");
        assert!(d.is_local);
        assert_eq!(d.message, LOCAL_FREE_MESSAGE);
        assert_eq!(d.delivery_fee, Some(0.0));
        assert_eq!(d.estimated_time.as_deref(), Some("24h"));
        assert!(d.delivery_available);
    }

    #[test]
    fn test_zone_match_paid() {
        let d = DeliveryDecision::zone_match(15.9, "48h");
        assert!(!d.is_local);
        assert_eq!(d.message, "Delivery fee: R$ 15.90");
        assert_eq!(d.delivery_fee, Some(15.9));
    }

    #[test]
    fn test_fallback_shape() {
        let d = DeliveryDecision::fallback();
        assert!(!d.is_local);
        assert!(d.is_fallback());
        assert_eq!(d.estimated_time.as_deref(), Some(FALLBACK_TIME));
        assert!(d.delivery_available);
    }

    #[test]
    fn test_prompt_with_summary() {
        assert_eq!(DeliveryDecision::prompt(None).message, PROMPT_MESSAGE);
        assert_eq!(DeliveryDecision::prompt(Some("")).message, PROMPT_MESSAGE);
        let d = DeliveryDecision::prompt(Some("Delivers to: Centro (free, 24h)"));
        assert_eq!(
            d.message,
            "Enter your postal code to check delivery. Delivers to: Centro (free, 24h)"
        );
        assert!(!d.is_fallback());
    }

    #[test]
    fn test_restricted() {
        let d = DeliveryDecision::restricted(RestrictionType::NotDelivered, "No delivery");
        assert!(d.has_restriction);
        assert!(!d.delivery_available);
        let d = DeliveryDecision::restricted(RestrictionType::HigherFee, "Extra fee");
        assert!(d.delivery_available);
        assert_eq!(d.restriction_type, Some(RestrictionType::HigherFee));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_string(&DeliveryDecision::prompt(None)).unwrap();
        assert!(!json.contains("delivery_fee"));
        assert!(!json.contains("restriction_type"));
        let json =
            serde_json::to_string(&DeliveryDecision::restricted(RestrictionType::HigherFee, "x"))
                .unwrap();
        assert!(json.contains("\"restriction_type\":\"higher_fee\""));
    }
}
