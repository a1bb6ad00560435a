//! Store Module
//!
//! Collaborator seams consumed by the resolvers. Adapters:
//!
//! - [`crate::db::SqliteStore`] - SQLite tables (zones, restrictions, postal codes)
//! - [`InMemoryStore`] - tests and embedding
//! - [`crate::postal::ViaCepClient`] - HTTP geocoding
//! - [`RetryingStore`] - wraps any adapter with timeout + bounded retry
//! - [`ChainedPostalStore`] - local table first, remote provider second

mod chained;
mod memory;
mod retrying;

pub use chained::ChainedPostalStore;
pub use memory::InMemoryStore;
pub use retrying::RetryingStore;

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{DeliveryZone, PostalCode, PostalLocation, ProductRestriction};

/// Postal code → city / region lookup table
#[async_trait]
pub trait PostalCodeStore: Send + Sync {
    /// `Ok(None)` when the postal code is unknown
    async fn get(&self, postal_code: &PostalCode) -> AppResult<Option<PostalLocation>>;
}

/// Vendor delivery zone configuration
#[async_trait]
pub trait VendorZoneStore: Send + Sync {
    /// Active zones of a vendor, cheapest first
    async fn list_active(&self, vendor_id: i64) -> AppResult<Vec<DeliveryZone>>;
}

/// Product delivery restrictions
#[async_trait]
pub trait ProductRestrictionStore: Send + Sync {
    /// Active restrictions of a product, in creation order
    async fn list_active(
        &self,
        vendor_id: i64,
        product_id: i64,
    ) -> AppResult<Vec<ProductRestriction>>;
}
