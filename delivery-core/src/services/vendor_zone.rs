//! Vendor Zone Resolver
//!
//! 商家配送区域匹配：按运费升序，命中第一个区域即返回。

use crate::matching::CustomerMatcher;
use crate::postal::PostalCodeLookup;
use crate::store::VendorZoneStore;
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{DeliveryDecision, DeliveryZone, PostalCode};
use shared::util::{format_fee, to_decimal};
use std::sync::Arc;

/// Human readable list of a vendor's zones (display only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub has_zones: bool,
    /// "Delivers to: Centro (free, 24h); Zona Sul (R$ 15.90, 48h)", empty without zones
    pub summary: String,
}

impl ZoneSummary {
    pub fn from_zones(zones: &[DeliveryZone]) -> Self {
        if zones.is_empty() {
            return Self::default();
        }
        let parts: Vec<String> = zones
            .iter()
            .map(|z| format!("{} ({}, {})", z.zone_name, fee_label(z.delivery_fee), z.delivery_time))
            .collect();
        Self {
            has_zones: true,
            summary: format!("Delivers to: {}", parts.join("; ")),
        }
    }
}

fn fee_label(fee: f64) -> String {
    let fee = to_decimal(fee);
    if fee.is_zero() {
        "free".to_string()
    } else {
        format_fee(fee)
    }
}

pub struct VendorZoneResolver {
    store: Arc<dyn VendorZoneStore>,
    lookup: Arc<PostalCodeLookup>,
}

impl VendorZoneResolver {
    pub fn new(store: Arc<dyn VendorZoneStore>, lookup: Arc<PostalCodeLookup>) -> Self {
        Self { store, lookup }
    }

    /// Active zones, cheapest first
    ///
    /// Re-sorted here so equal fees keep the store's order whatever the adapter.
    async fn active_zones(&self, vendor_id: i64) -> AppResult<Vec<DeliveryZone>> {
        let mut zones = self.store.list_active(vendor_id).await?;
        zones.retain(|z| z.active);
        zones.sort_by(|a, b| a.delivery_fee.total_cmp(&b.delivery_fee));
        Ok(zones)
    }

    /// Delivery decision from the vendor zones
    ///
    /// Falls back to [`DeliveryDecision::fallback`] when no zone matches, the
    /// vendor has no zones, or the store is unavailable.
    pub async fn resolve(&self, vendor_id: i64, customer_postal_code: &str) -> DeliveryDecision {
        let Ok(customer) = PostalCode::parse(customer_postal_code) else {
            return DeliveryDecision::fallback();
        };
        let matcher = CustomerMatcher::new(customer, &self.lookup);
        self.resolve_with(vendor_id, &matcher).await
    }

    /// Same as [`resolve`](Self::resolve), sharing the matcher's location lookup
    pub async fn resolve_with(
        &self,
        vendor_id: i64,
        matcher: &CustomerMatcher<'_>,
    ) -> DeliveryDecision {
        let zones = match self.active_zones(vendor_id).await {
            Ok(zones) => zones,
            Err(e) => {
                crate::degraded_log!("zone_store_failed", vendor_id, error = %e);
                return DeliveryDecision::fallback();
            }
        };

        for zone in &zones {
            if matcher.matches(zone.zone_type, &zone.zone_value).await {
                tracing::debug!(
                    vendor_id,
                    zone_id = zone.id,
                    zone_name = %zone.zone_name,
                    postal_code = %matcher.customer(),
                    "Delivery zone matched"
                );
                return DeliveryDecision::zone_match(zone.delivery_fee, &zone.delivery_time);
            }
        }

        tracing::debug!(
            vendor_id,
            zones = zones.len(),
            postal_code = %matcher.customer(),
            "No delivery zone matched"
        );
        DeliveryDecision::fallback()
    }

    /// Summary of the vendor zones, empty on store failure
    pub async fn describe_zones(&self, vendor_id: i64) -> ZoneSummary {
        match self.active_zones(vendor_id).await {
            Ok(zones) => ZoneSummary::from_zones(&zones),
            Err(e) => {
                crate::degraded_log!("zone_summary_failed", vendor_id, error = %e);
                ZoneSummary::default()
            }
        }
    }
}
