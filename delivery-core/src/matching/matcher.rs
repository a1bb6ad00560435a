//! Zone Matcher
//!
//! Zone membership checks for one customer postal code. Malformed zone
//! configuration is logged and treated as non-matching, never as an error.

use super::rule::ZoneRule;
use crate::postal::PostalCodeLookup;
use shared::models::{PostalCode, PostalLocation, ZoneType};
use tokio::sync::OnceCell;

/// Check a zone that needs no lookup (`exact_code`, `code_range`)
///
/// City and region zones always return false here; use [`matches_async`].
pub fn matches(customer_postal_code: &str, zone_type: ZoneType, zone_value: &str) -> bool {
    matches_with_location(customer_postal_code, zone_type, zone_value, None)
}

/// Check any zone with an already resolved customer location
pub fn matches_with_location(
    customer_postal_code: &str,
    zone_type: ZoneType,
    zone_value: &str,
    location: Option<&PostalLocation>,
) -> bool {
    let Ok(customer) = PostalCode::parse(customer_postal_code) else {
        tracing::debug!(customer_postal_code, "Customer postal code is not 8 digits");
        return false;
    };
    match parse_logged(zone_type, zone_value) {
        Some(rule) => rule.matches(&customer, location),
        None => false,
    }
}

/// Check any zone, resolving the customer location through `lookup` when needed
pub async fn matches_async(
    customer_postal_code: &str,
    zone_type: ZoneType,
    zone_value: &str,
    lookup: &PostalCodeLookup,
) -> bool {
    let Ok(customer) = PostalCode::parse(customer_postal_code) else {
        tracing::debug!(customer_postal_code, "Customer postal code is not 8 digits");
        return false;
    };
    CustomerMatcher::new(customer, lookup)
        .matches(zone_type, zone_value)
        .await
}

/// Parse a rule, logging malformed configuration for operators
pub fn parse_logged(zone_type: ZoneType, zone_value: &str) -> Option<ZoneRule> {
    match ZoneRule::parse(zone_type, zone_value) {
        Ok(rule) => Some(rule),
        Err(e) => {
            tracing::warn!(
                target: "delivery::config",
                zone_type = %zone_type,
                zone_value,
                error = %e,
                "Malformed zone configuration, treated as non-matching"
            );
            None
        }
    }
}

/// Matches many zones against one customer
///
/// The location lookup runs at most once, and only when a city or region
/// zone is evaluated.
pub struct CustomerMatcher<'a> {
    customer: PostalCode,
    lookup: &'a PostalCodeLookup,
    location: OnceCell<Option<PostalLocation>>,
}

impl<'a> CustomerMatcher<'a> {
    pub fn new(customer: PostalCode, lookup: &'a PostalCodeLookup) -> Self {
        Self {
            customer,
            lookup,
            location: OnceCell::new(),
        }
    }

    pub fn customer(&self) -> &PostalCode {
        &self.customer
    }

    /// Customer city / region, `None` when unknown or the lookup failed
    pub async fn location(&self) -> Option<&PostalLocation> {
        self.location
            .get_or_init(|| self.lookup.lookup(self.customer.as_str()))
            .await
            .as_ref()
    }

    /// Check a raw `(zone_type, zone_value)` pair
    pub async fn matches(&self, zone_type: ZoneType, zone_value: &str) -> bool {
        match parse_logged(zone_type, zone_value) {
            Some(rule) => self.matches_rule(&rule).await,
            None => false,
        }
    }

    /// Check a parsed rule
    pub async fn matches_rule(&self, rule: &ZoneRule) -> bool {
        if rule.requires_lookup() {
            let location = self.location().await;
            rule.matches(&self.customer, location)
        } else {
            rule.matches(&self.customer, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use std::sync::Arc;

    fn lookup() -> PostalCodeLookup {
        let store = InMemoryStore::new().with_postal_code("80010-000", "Curitiba", "4106902");
        PostalCodeLookup::new(Arc::new(store))
    }

    #[test]
    fn test_sync_exact_and_range() {
        assert!(matches("01310-100", ZoneType::ExactCode, "01310100"));
        assert!(!matches("01310-101", ZoneType::ExactCode, "01310100"));
        assert!(matches("01500000", ZoneType::CodeRange, "01000000-01999999"));
        assert!(!matches("02000000", ZoneType::CodeRange, "01000000-01999999"));
    }

    #[test]
    fn test_sync_lookup_zones_need_location() {
        assert!(!matches("80010000", ZoneType::City, "Curitiba"));
        let loc = PostalLocation {
            city: "Curitiba".into(),
            region_code: "4106902".into(),
        };
        assert!(matches_with_location(
            "80010000",
            ZoneType::City,
            "curitiba",
            Some(&loc)
        ));
        assert!(matches_with_location(
            "80010000",
            ZoneType::RegionCode,
            "4106902",
            Some(&loc)
        ));
    }

    #[test]
    fn test_invalid_customer_never_matches() {
        assert!(!matches("0131010", ZoneType::ExactCode, "0131010"));
        assert!(!matches("", ZoneType::CodeRange, "00000000-99999999"));
    }

    #[test]
    fn test_malformed_zone_never_matches() {
        assert!(!matches("01500000", ZoneType::CodeRange, "01999999-01000000"));
        assert!(!matches("01500000", ZoneType::CodeRange, "01000000"));
    }

    #[tokio::test]
    async fn test_async_city_and_region() {
        let lookup = lookup();
        assert!(matches_async("80010-000", ZoneType::City, "CURITIBA", &lookup).await);
        assert!(matches_async("80010000", ZoneType::RegionCode, "4106902", &lookup).await);
        assert!(!matches_async("80010000", ZoneType::City, "Londrina", &lookup).await);
    }

    #[tokio::test]
    async fn test_async_unknown_postal_code_is_non_matching() {
        let lookup = lookup();
        assert!(!matches_async("99999999", ZoneType::City, "Curitiba", &lookup).await);
    }

    #[tokio::test]
    async fn test_customer_matcher_skips_lookup_for_code_zones() {
        let lookup = lookup();
        let matcher = CustomerMatcher::new(PostalCode::parse("80010000").unwrap(), &lookup);
        assert!(matcher.matches(ZoneType::ExactCode, "80010-000").await);
        assert!(!matcher.location.initialized());
        assert!(matcher.matches(ZoneType::City, "Curitiba").await);
        assert!(matcher.location.initialized());
    }
}
