//! Delivery Decision Service
//!
//! Entry point for the product page: restriction check first, vendor zones
//! second, prompt when the customer has not given a postal code yet.

use super::restriction::RestrictionResolver;
use super::vendor_zone::{VendorZoneResolver, ZoneSummary};
use crate::matching::CustomerMatcher;
use crate::postal::PostalCodeLookup;
use crate::store::{PostalCodeStore, ProductRestrictionStore, VendorZoneStore};
use shared::models::{DeliveryDecision, PostalCode};
use std::sync::Arc;

pub struct DeliveryDecisionService {
    restrictions: RestrictionResolver,
    zones: VendorZoneResolver,
    lookup: Arc<PostalCodeLookup>,
    /// Prompt decision carries the zone summary
    include_zone_summary: bool,
}

impl DeliveryDecisionService {
    pub fn new(
        restriction_store: Arc<dyn ProductRestrictionStore>,
        zone_store: Arc<dyn VendorZoneStore>,
        postal_store: Arc<dyn PostalCodeStore>,
    ) -> Self {
        let lookup = Arc::new(PostalCodeLookup::new(postal_store));
        Self::with_lookup(restriction_store, zone_store, lookup)
    }

    /// Share an existing postal lookup (and its cache)
    pub fn with_lookup(
        restriction_store: Arc<dyn ProductRestrictionStore>,
        zone_store: Arc<dyn VendorZoneStore>,
        lookup: Arc<PostalCodeLookup>,
    ) -> Self {
        Self {
            restrictions: RestrictionResolver::new(restriction_store, lookup.clone()),
            zones: VendorZoneResolver::new(zone_store, lookup.clone()),
            lookup,
            include_zone_summary: true,
        }
    }

    pub fn with_zone_summary(mut self, enabled: bool) -> Self {
        self.include_zone_summary = enabled;
        self
    }

    pub fn lookup(&self) -> &PostalCodeLookup {
        &self.lookup
    }

    /// Decide how a product is delivered to a customer
    ///
    /// Always returns a decision. A missing, blank or malformed postal code
    /// gets the prompt decision.
    pub async fn decide(
        &self,
        vendor_id: i64,
        product_id: i64,
        customer_postal_code: Option<&str>,
    ) -> DeliveryDecision {
        let customer = customer_postal_code
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match PostalCode::parse(raw) {
                Ok(code) => Some(code),
                Err(_) => {
                    tracing::debug!(vendor_id, postal_code = raw, "Invalid customer postal code");
                    None
                }
            });

        let Some(customer) = customer else {
            return self.prompt(vendor_id).await;
        };

        let matcher = CustomerMatcher::new(customer, &self.lookup);

        let restriction = self
            .restrictions
            .resolve_with(vendor_id, product_id, &matcher)
            .await;
        if let Some(decision) = restriction.into_decision() {
            return decision;
        }

        self.zones.resolve_with(vendor_id, &matcher).await
    }

    /// Zone summary for display
    pub async fn describe_zones(&self, vendor_id: i64) -> ZoneSummary {
        self.zones.describe_zones(vendor_id).await
    }

    async fn prompt(&self, vendor_id: i64) -> DeliveryDecision {
        if !self.include_zone_summary {
            return DeliveryDecision::prompt(None);
        }
        let summary = self.describe_zones(vendor_id).await;
        DeliveryDecision::prompt(summary.has_zones.then_some(summary.summary.as_str()))
    }
}
