use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::Coordinate;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-memory cache for place-search responses
///
/// Only the unranked live fetch is cached; ranking is recomputed per request
/// so toggling the sort criterion never serves a stale ordering.
pub struct ShopCache {
    inner: moka::future::Cache<String, Vec<u8>>,
}

/// Cache key helpers
pub struct CacheKey;

impl CacheKey {
    /// Key for a nearby-search result
    ///
    /// The origin is rounded to four decimals (~11 m) so that jittery
    /// geolocation fixes still hit the same entry.
    pub fn nearby(origin: Coordinate, radius_m: u32) -> String {
        format!("nearby:{:.4}:{:.4}:{}", origin.lat, origin.lon, radius_m)
    }
}

impl ShopCache {
    /// Create a new cache with the given capacity and entry TTL
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    /// Get a value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.inner.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in the cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.inner.insert(key.to_string(), bytes).await;
        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop a single entry
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepairShop;

    #[test]
    fn test_cache_key_rounds_origin() {
        let a = CacheKey::nearby(Coordinate::new(19.13401, 72.83362), 5000);
        let b = CacheKey::nearby(Coordinate::new(19.13399, 72.83358), 5000);
        assert_eq!(a, b);
        assert_eq!(a, "nearby:19.1340:72.8336:5000");
    }

    #[test]
    fn test_cache_key_varies_with_radius() {
        let a = CacheKey::nearby(Coordinate::new(19.1340, 72.8336), 1500);
        let b = CacheKey::nearby(Coordinate::new(19.1340, 72.8336), 5000);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let cache = ShopCache::new(16, 60);
        let key = CacheKey::nearby(Coordinate::new(19.1340, 72.8336), 5000);

        let shops = vec![RepairShop {
            id: "s1".to_string(),
            name: "Shop".to_string(),
            vicinity: None,
            location: Coordinate::new(19.1, 72.8),
            rating: Some(4.1),
            open_now: None,
            distance_km: None,
        }];

        cache.set(&key, &shops).await.unwrap();
        let cached: Vec<RepairShop> = cache.get(&key).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "s1");
    }

    #[tokio::test]
    async fn test_cache_miss_after_invalidate() {
        let cache = ShopCache::new(16, 60);
        cache.set("k", &vec![1, 2, 3]).await.unwrap();
        cache.invalidate("k").await;

        let result: Result<Vec<i32>, _> = cache.get("k").await;
        assert!(matches!(result, Err(CacheError::CacheMiss(_))));
    }
}
