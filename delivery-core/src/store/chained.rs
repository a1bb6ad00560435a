//! Chained postal code store

use super::PostalCodeStore;
use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{PostalCode, PostalLocation};
use std::sync::Arc;

/// Tries each store in order, first hit wins
///
/// A failing store does not stop the chain. The last error is returned only
/// when no store produced a hit.
#[derive(Clone, Default)]
pub struct ChainedPostalStore {
    stores: Vec<Arc<dyn PostalCodeStore>>,
}

impl std::fmt::Debug for ChainedPostalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedPostalStore")
            .field("stores", &self.stores.len())
            .finish()
    }
}

impl ChainedPostalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, store: Arc<dyn PostalCodeStore>) -> Self {
        self.stores.push(store);
        self
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[async_trait]
impl PostalCodeStore for ChainedPostalStore {
    async fn get(&self, postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
        let mut last_error = None;
        for (index, store) in self.stores.iter().enumerate() {
            match store.get(postal_code).await {
                Ok(Some(location)) => return Ok(Some(location)),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(
                        postal_code = %postal_code,
                        store_index = index,
                        error = %e,
                        "Postal store failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use shared::error::{AppError, ErrorCode};

    struct Down;

    #[async_trait]
    impl PostalCodeStore for Down {
        async fn get(&self, _postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
            Err(AppError::network("geocoder down"))
        }
    }

    fn code(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_falls_through_to_second_store() {
        let local = InMemoryStore::new();
        let remote = InMemoryStore::new().with_postal_code("80010000", "Curitiba", "4106902");
        let chain = ChainedPostalStore::new()
            .then(Arc::new(local))
            .then(Arc::new(remote));

        let loc = chain.get(&code("80010000")).await.unwrap().unwrap();
        assert_eq!(loc.region_code, "4106902");
    }

    #[tokio::test]
    async fn test_error_skipped_when_later_store_hits() {
        let remote = InMemoryStore::new().with_postal_code("80010000", "Curitiba", "4106902");
        let chain = ChainedPostalStore::new()
            .then(Arc::new(Down))
            .then(Arc::new(remote));
        assert!(chain.get(&code("80010000")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_error_reported_when_nothing_found() {
        let chain = ChainedPostalStore::new()
            .then(Arc::new(InMemoryStore::new()))
            .then(Arc::new(Down));
        let err = chain.get(&code("80010000")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn test_empty_chain_finds_nothing() {
        let chain = ChainedPostalStore::new();
        assert!(chain.is_empty());
        assert!(chain.get(&code("80010000")).await.unwrap().is_none());
    }
}
