//! SQLite-backed stores

use super::repository::{delivery_zone, postal_code, product_restriction};
use crate::store::{PostalCodeStore, ProductRestrictionStore, VendorZoneStore};
use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{DeliveryZone, PostalCode, PostalLocation, ProductRestriction};
use sqlx::SqlitePool;

/// Implements the three store traits over the repositories
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PostalCodeStore for SqliteStore {
    async fn get(&self, code: &PostalCode) -> AppResult<Option<PostalLocation>> {
        Ok(postal_code::find(&self.pool, code).await?)
    }
}

#[async_trait]
impl VendorZoneStore for SqliteStore {
    async fn list_active(&self, vendor_id: i64) -> AppResult<Vec<DeliveryZone>> {
        Ok(delivery_zone::find_active_by_vendor(&self.pool, vendor_id).await?)
    }
}

#[async_trait]
impl ProductRestrictionStore for SqliteStore {
    async fn list_active(
        &self,
        vendor_id: i64,
        product_id: i64,
    ) -> AppResult<Vec<ProductRestriction>> {
        Ok(product_restriction::find_active_by_product(&self.pool, vendor_id, product_id).await?)
    }
}
