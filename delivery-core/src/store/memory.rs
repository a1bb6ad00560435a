//! In-memory store

use super::{PostalCodeStore, ProductRestrictionStore, VendorZoneStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared::error::AppResult;
use shared::models::{
    DeliveryZone, PostalCode, PostalLocation, ProductRestriction, RestrictionType, ZoneType,
    strip_non_digits,
};
use shared::util::now_millis;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// All three stores backed by process memory
///
/// Rows keep insertion order. Ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    zones: RwLock<Vec<DeliveryZone>>,
    restrictions: RwLock<Vec<ProductRestriction>>,
    postal_codes: RwLock<HashMap<String, PostalLocation>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Add a zone, returns its id
    pub fn add_zone(
        &self,
        vendor_id: i64,
        zone_name: &str,
        zone_type: ZoneType,
        zone_value: &str,
        delivery_fee: f64,
        delivery_time: &str,
    ) -> i64 {
        let id = self.next_id();
        self.zones.write().push(DeliveryZone {
            id,
            vendor_id,
            zone_name: zone_name.to_string(),
            zone_type,
            zone_value: zone_value.to_string(),
            delivery_fee,
            delivery_time: delivery_time.to_string(),
            active: true,
            created_at: now_millis(),
        });
        id
    }

    /// Add a restriction, returns its id
    pub fn add_restriction(
        &self,
        vendor_id: i64,
        product_id: i64,
        zone_type: ZoneType,
        zone_value: &str,
        restriction_type: RestrictionType,
        restriction_message: &str,
    ) -> i64 {
        let id = self.next_id();
        self.restrictions.write().push(ProductRestriction {
            id,
            vendor_id,
            product_id,
            zone_type,
            zone_value: zone_value.to_string(),
            restriction_type,
            restriction_message: restriction_message.to_string(),
            active: true,
            created_at: now_millis(),
        });
        id
    }

    /// Add a postal code mapping (any punctuation)
    pub fn add_postal_code(&self, postal_code: &str, city: &str, region_code: &str) {
        self.postal_codes.write().insert(
            strip_non_digits(postal_code),
            PostalLocation {
                city: city.to_string(),
                region_code: region_code.to_string(),
            },
        );
    }

    /// Enable or disable a zone or restriction by id
    pub fn set_active(&self, id: i64, active: bool) {
        for zone in self.zones.write().iter_mut().filter(|z| z.id == id) {
            zone.active = active;
        }
        for restriction in self.restrictions.write().iter_mut().filter(|r| r.id == id) {
            restriction.active = active;
        }
    }

    // ========== Builders ==========

    pub fn with_zone(
        self,
        vendor_id: i64,
        zone_type: ZoneType,
        zone_value: &str,
        delivery_fee: f64,
        delivery_time: &str,
    ) -> Self {
        let name = format!("{} {}", zone_type, zone_value);
        self.add_zone(vendor_id, &name, zone_type, zone_value, delivery_fee, delivery_time);
        self
    }

    pub fn with_restriction(
        self,
        vendor_id: i64,
        product_id: i64,
        zone_type: ZoneType,
        zone_value: &str,
        restriction_type: RestrictionType,
        restriction_message: &str,
    ) -> Self {
        self.add_restriction(
            vendor_id,
            product_id,
            zone_type,
            zone_value,
            restriction_type,
            restriction_message,
        );
        self
    }

    pub fn with_postal_code(self, postal_code: &str, city: &str, region_code: &str) -> Self {
        self.add_postal_code(postal_code, city, region_code);
        self
    }
}

#[async_trait]
impl PostalCodeStore for InMemoryStore {
    async fn get(&self, postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
        Ok(self.postal_codes.read().get(postal_code.as_str()).cloned())
    }
}

#[async_trait]
impl VendorZoneStore for InMemoryStore {
    async fn list_active(&self, vendor_id: i64) -> AppResult<Vec<DeliveryZone>> {
        let mut zones: Vec<DeliveryZone> = self
            .zones
            .read()
            .iter()
            .filter(|z| z.vendor_id == vendor_id && z.active)
            .cloned()
            .collect();
        zones.sort_by(|a, b| a.delivery_fee.total_cmp(&b.delivery_fee));
        Ok(zones)
    }
}

#[async_trait]
impl ProductRestrictionStore for InMemoryStore {
    async fn list_active(
        &self,
        vendor_id: i64,
        product_id: i64,
    ) -> AppResult<Vec<ProductRestriction>> {
        Ok(self
            .restrictions
            .read()
            .iter()
            .filter(|r| r.vendor_id == vendor_id && r.product_id == product_id && r.active)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zones_scoped_to_vendor_and_sorted_by_fee() {
        let store = InMemoryStore::new()
            .with_zone(1, ZoneType::CodeRange, "01000000-01999999", 12.0, "48h")
            .with_zone(1, ZoneType::ExactCode, "01310100", 0.0, "24h")
            .with_zone(2, ZoneType::City, "Curitiba", 5.0, "24h");

        let zones = VendorZoneStore::list_active(&store, 1).await.unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].zone_type, ZoneType::ExactCode);
        assert_eq!(zones[1].delivery_fee, 12.0);
    }

    #[tokio::test]
    async fn test_inactive_rows_hidden() {
        let store = InMemoryStore::new();
        let id = store.add_restriction(
            1,
            10,
            ZoneType::City,
            "Curitiba",
            RestrictionType::NotDelivered,
            "",
        );
        assert_eq!(
            ProductRestrictionStore::list_active(&store, 1, 10)
                .await
                .unwrap()
                .len(),
            1
        );
        store.set_active(id, false);
        assert!(
            ProductRestrictionStore::list_active(&store, 1, 10)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_postal_code_normalized_on_insert() {
        let store = InMemoryStore::new().with_postal_code("80010-000", "Curitiba", "4106902");
        let code = PostalCode::parse("80010000").unwrap();
        let loc = store.get(&code).await.unwrap().unwrap();
        assert_eq!(loc.city, "Curitiba");
    }
}
