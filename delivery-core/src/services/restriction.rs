//! Restriction Resolver
//!
//! Product-level overrides of the vendor zones. The first active restriction
//! (creation order) whose zone contains the customer wins.

use crate::matching::CustomerMatcher;
use crate::postal::PostalCodeLookup;
use crate::store::ProductRestrictionStore;
use serde::{Deserialize, Serialize};
use shared::models::{DeliveryDecision, PostalCode, ProductRestriction, RestrictionType};
use std::sync::Arc;

/// Result of the restriction check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionOutcome {
    pub has_restriction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_type: Option<RestrictionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub delivery_available: bool,
}

impl RestrictionOutcome {
    /// No restriction applies
    pub fn none() -> Self {
        Self {
            has_restriction: false,
            restriction_type: None,
            message: None,
            delivery_available: true,
        }
    }

    pub fn from_restriction(restriction: &ProductRestriction) -> Self {
        Self {
            has_restriction: true,
            restriction_type: Some(restriction.restriction_type),
            message: Some(restriction.display_message()),
            delivery_available: restriction.restriction_type.allows_delivery(),
        }
    }

    /// Decision for a matched restriction, `None` when nothing matched
    pub fn into_decision(self) -> Option<DeliveryDecision> {
        if !self.has_restriction {
            return None;
        }
        let restriction_type = self.restriction_type?;
        let message = self
            .message
            .unwrap_or_else(|| restriction_type.default_message().to_string());
        Some(DeliveryDecision::restricted(restriction_type, message))
    }
}

pub struct RestrictionResolver {
    store: Arc<dyn ProductRestrictionStore>,
    lookup: Arc<PostalCodeLookup>,
}

impl RestrictionResolver {
    pub fn new(store: Arc<dyn ProductRestrictionStore>, lookup: Arc<PostalCodeLookup>) -> Self {
        Self { store, lookup }
    }

    /// Check the product restrictions for a customer postal code
    ///
    /// Never fails: a malformed postal code or a store error yields
    /// [`RestrictionOutcome::none`].
    pub async fn resolve(
        &self,
        vendor_id: i64,
        product_id: i64,
        customer_postal_code: &str,
    ) -> RestrictionOutcome {
        let Ok(customer) = PostalCode::parse(customer_postal_code) else {
            return RestrictionOutcome::none();
        };
        let matcher = CustomerMatcher::new(customer, &self.lookup);
        self.resolve_with(vendor_id, product_id, &matcher).await
    }

    /// Same as [`resolve`](Self::resolve), sharing the matcher's location lookup
    pub async fn resolve_with(
        &self,
        vendor_id: i64,
        product_id: i64,
        matcher: &CustomerMatcher<'_>,
    ) -> RestrictionOutcome {
        let mut restrictions = match self.store.list_active(vendor_id, product_id).await {
            Ok(list) => list,
            Err(e) => {
                crate::degraded_log!(
                    "restriction_store_failed",
                    vendor_id,
                    product_id,
                    error = %e
                );
                return RestrictionOutcome::none();
            }
        };
        restrictions.retain(|r| r.active);
        restrictions.sort_by_key(|r| (r.created_at, r.id));

        for restriction in &restrictions {
            if matcher
                .matches(restriction.zone_type, &restriction.zone_value)
                .await
            {
                tracing::debug!(
                    vendor_id,
                    product_id,
                    restriction_id = restriction.id,
                    restriction_type = %restriction.restriction_type,
                    postal_code = %matcher.customer(),
                    "Product restriction matched"
                );
                return RestrictionOutcome::from_restriction(restriction);
            }
        }
        RestrictionOutcome::none()
    }
}
