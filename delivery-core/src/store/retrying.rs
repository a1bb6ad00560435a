//! Retrying store adapter

use super::{PostalCodeStore, ProductRestrictionStore, VendorZoneStore};
use crate::utils::retry::{RetryPolicy, with_retry};
use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{DeliveryZone, PostalCode, PostalLocation, ProductRestriction};

/// Applies [`RetryPolicy`] to every call of the wrapped store
#[derive(Debug, Clone)]
pub struct RetryingStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> RetryingStore<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<S: PostalCodeStore> PostalCodeStore for RetryingStore<S> {
    async fn get(&self, postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
        with_retry(&self.policy, "postal_codes.get", || self.inner.get(postal_code)).await
    }
}

#[async_trait]
impl<S: VendorZoneStore> VendorZoneStore for RetryingStore<S> {
    async fn list_active(&self, vendor_id: i64) -> AppResult<Vec<DeliveryZone>> {
        with_retry(&self.policy, "delivery_zones.list_active", || {
            self.inner.list_active(vendor_id)
        })
        .await
    }
}

#[async_trait]
impl<S: ProductRestrictionStore> ProductRestrictionStore for RetryingStore<S> {
    async fn list_active(
        &self,
        vendor_id: i64,
        product_id: i64,
    ) -> AppResult<Vec<ProductRestriction>> {
        with_retry(&self.policy, "product_restrictions.list_active", || {
            self.inner.list_active(vendor_id, product_id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{AppError, ErrorCode};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Fails with a network error until `failures` calls have been made
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl VendorZoneStore for Flaky {
        async fn list_active(&self, _vendor_id: i64) -> AppResult<Vec<DeliveryZone>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(AppError::network("store unavailable"))
            } else {
                Ok(vec![])
            }
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::new(Duration::from_secs(5), 2, Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_within_attempts() {
        let store = RetryingStore::new(
            Flaky {
                failures: 1,
                calls: AtomicU32::new(0),
            },
            policy(),
        );
        assert!(store.list_active(1).await.unwrap().is_empty());
        assert_eq!(store.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let store = RetryingStore::new(
            Flaky {
                failures: 10,
                calls: AtomicU32::new(0),
            },
            policy(),
        );
        let err = store.list_active(1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(store.inner().calls.load(Ordering::SeqCst), 2);
    }
}
