//! Postal Code Lookup - read-through cache in front of a [`PostalCodeStore`]

use crate::store::PostalCodeStore;
use dashmap::DashMap;
use shared::error::AppResult;
use shared::models::{PostalCode, PostalLocation};
use std::sync::Arc;

/// Default upper bound for cached postal codes
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Resolves postal codes to city / region
///
/// Hits are cached for the life of the process. Misses and store errors are
/// not cached, so a later call can still find a code the geocoding cache
/// learned in the meantime. Two concurrent misses for the same code both
/// query the store.
pub struct PostalCodeLookup {
    store: Arc<dyn PostalCodeStore>,
    /// "80010000" -> location
    cache: DashMap<String, PostalLocation>,
    capacity: usize,
}

impl std::fmt::Debug for PostalCodeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostalCodeLookup")
            .field("cached", &self.cache.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl PostalCodeLookup {
    pub fn new(store: Arc<dyn PostalCodeStore>) -> Self {
        Self::with_capacity(store, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(store: Arc<dyn PostalCodeStore>, capacity: usize) -> Self {
        Self {
            store,
            cache: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Resolve a postal code in any punctuation
    ///
    /// Returns `None` for malformed codes, unknown codes and store failures.
    pub async fn lookup(&self, postal_code: &str) -> Option<PostalLocation> {
        let code = match PostalCode::parse(postal_code) {
            Ok(code) => code,
            Err(_) => {
                tracing::debug!(postal_code, "Postal code is not 8 digits, lookup skipped");
                return None;
            }
        };

        match self.try_lookup(&code).await {
            Ok(location) => location,
            Err(e) => {
                crate::degraded_log!(
                    "postal_lookup_failed",
                    postal_code = %code,
                    error = %e
                );
                None
            }
        }
    }

    /// Resolve a normalized postal code, surfacing store errors
    pub async fn try_lookup(&self, code: &PostalCode) -> AppResult<Option<PostalLocation>> {
        if let Some(hit) = self.cached(code) {
            return Ok(Some(hit));
        }

        let found = self.store.get(code).await?;
        match &found {
            Some(location) => {
                if self.cache.len() >= self.capacity {
                    tracing::debug!(capacity = self.capacity, "Postal cache full, clearing");
                    self.cache.clear();
                }
                self.cache.insert(code.as_str().to_string(), location.clone());
            }
            None => {
                tracing::debug!(postal_code = %code, "Postal code not found");
            }
        }
        Ok(found)
    }

    /// Cached entry, if any
    pub fn cached(&self, code: &PostalCode) -> Option<PostalLocation> {
        self.cache.get(code.as_str()).map(|entry| entry.value().clone())
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use shared::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Counts store hits
    struct Counting {
        inner: InMemoryStore,
        calls: AtomicU32,
    }

    #[async_trait]
    impl PostalCodeStore for Counting {
        async fn get(&self, postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get(postal_code).await
        }
    }

    struct Down;

    #[async_trait]
    impl PostalCodeStore for Down {
        async fn get(&self, _postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
            Err(AppError::network("geocoder down"))
        }
    }

    fn counting() -> Arc<Counting> {
        Arc::new(Counting {
            inner: InMemoryStore::new().with_postal_code("80010000", "Curitiba", "4106902"),
            calls: AtomicU32::new(0),
        })
    }

    #[tokio::test]
    async fn test_hit_is_cached() {
        let store = counting();
        let lookup = PostalCodeLookup::new(store.clone());

        let first = lookup.lookup("80010-000").await.unwrap();
        let second = lookup.lookup("80010000").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.city, "Curitiba");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.cached_len(), 1);
    }

    #[tokio::test]
    async fn test_miss_not_cached() {
        let store = counting();
        let lookup = PostalCodeLookup::new(store.clone());

        assert!(lookup.lookup("01310100").await.is_none());
        assert!(lookup.lookup("01310100").await.is_none());
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
        assert_eq!(lookup.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_malformed_code_skips_store() {
        let store = counting();
        let lookup = PostalCodeLookup::new(store.clone());
        assert!(lookup.lookup("8001").await.is_none());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_error_degrades_to_none() {
        let lookup = PostalCodeLookup::new(Arc::new(Down));
        assert!(lookup.lookup("80010000").await.is_none());

        let code = PostalCode::parse("80010000").unwrap();
        assert!(lookup.try_lookup(&code).await.is_err());
    }

    #[tokio::test]
    async fn test_capacity_bounds_cache() {
        let store = InMemoryStore::new()
            .with_postal_code("80010000", "Curitiba", "4106902")
            .with_postal_code("01310100", "São Paulo", "3550308");
        let lookup = PostalCodeLookup::with_capacity(Arc::new(store), 1);

        lookup.lookup("80010000").await.unwrap();
        lookup.lookup("01310100").await.unwrap();
        assert_eq!(lookup.cached_len(), 1);
        assert!(lookup.cached(&PostalCode::parse("01310100").unwrap()).is_some());
    }
}
