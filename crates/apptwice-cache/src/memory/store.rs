//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::{debug, warn};

use apptwice_core::config::cache::MemoryCacheConfig;
use apptwice_core::error::AppError;
use apptwice_core::result::AppResult;
use apptwice_core::traits::cache::CacheProvider;

/// A cached value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was last written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Single-node only: entries are lost on restart and are not shared between
/// processes.
///
/// Live entries are never evicted by size. `max_capacity` is enforced on
/// insert instead, where a full cache refuses new keys with a cache error.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
    max_capacity: u64,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder().expire_after(PerEntryTtl).build();

        Self {
            cache,
            max_capacity: config.max_capacity,
        }
    }

    async fn ensure_capacity(&self) -> AppResult<()> {
        // The count lags behind inserts and expiries until pending work runs.
        self.cache.run_pending_tasks().await;
        if self.cache.entry_count() >= self.max_capacity {
            warn!(max_capacity = self.max_capacity, "In-memory cache is full");
            return Err(AppError::cache(format!(
                "In-memory cache is full ({} entries)",
                self.max_capacity
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        if self.cache.contains_key(key) {
            return Ok(false);
        }
        self.ensure_capacity().await?;

        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        let result = self
            .cache
            .entry(key.to_string())
            .or_insert_with(async move { entry })
            .await;
        Ok(result.is_fresh())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<u64> {
        let mut removed = 0u64;
        for key in keys {
            // `get` filters out expired entries that have not been evicted yet.
            if self.cache.get(key).await.is_some() && self.cache.remove(key).await.is_some() {
                removed += 1;
            }
        }

        debug!(requested = keys.len(), removed, "Deleted cache keys");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apptwice_core::config::cache::MemoryCacheConfig;
    use apptwice_core::error::ErrorKind;

    fn make_provider() -> MemoryCacheProvider {
        provider_with_capacity(1000)
    }

    fn provider_with_capacity(max_capacity: u64) -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity })
    }

    async fn value(provider: &MemoryCacheProvider, key: &str) -> Option<String> {
        provider.cache.get(key).await.map(|entry| entry.value)
    }

    #[tokio::test]
    async fn test_missing_key_does_not_exist() {
        let provider = make_provider();
        assert!(!provider.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_nx() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "val", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
        assert_eq!(value(&provider, "nx_key").await, Some("val".into()));
    }

    #[tokio::test]
    async fn test_per_entry_ttl() {
        let provider = make_provider();
        provider
            .set_nx("short", "v", Duration::from_millis(50))
            .await
            .unwrap();
        provider
            .set_nx("long", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!provider.exists("short").await.unwrap());
        assert!(provider.exists("long").await.unwrap());
    }

    #[tokio::test]
    async fn test_full_cache_refuses_instead_of_evicting() {
        let provider = provider_with_capacity(10);

        let mut accepted = Vec::new();
        for i in 0..50 {
            let key = format!("tok_{i}");
            match provider.set_nx(&key, "v", Duration::from_secs(600)).await {
                Ok(inserted) => {
                    assert!(inserted);
                    accepted.push(key);
                }
                Err(err) => assert_eq!(err.kind, ErrorKind::Cache),
            }
        }
        assert_eq!(accepted.len(), 10);

        provider.cache.run_pending_tasks().await;
        for key in &accepted {
            assert!(provider.exists(key).await.unwrap(), "{key} was evicted");
        }

        // Re-setting a live key is not an insert and still reports "present".
        assert!(!provider
            .set_nx("tok_0", "v", Duration::from_secs(600))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_expired_entries_free_capacity() {
        let provider = provider_with_capacity(2);
        for key in ["a", "b"] {
            provider
                .set_nx(key, "v", Duration::from_millis(50))
                .await
                .unwrap();
        }
        assert!(provider.set_nx("c", "v", Duration::from_secs(60)).await.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(provider.set_nx("c", "v", Duration::from_secs(60)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_many_counts_only_live_keys() {
        let provider = make_provider();
        for key in ["a", "b", "c"] {
            provider
                .set_nx(key, "v", Duration::from_secs(60))
                .await
                .unwrap();
        }

        let keys: Vec<String> = ["a", "b", "c", "never-set"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(provider.delete_many(&keys).await.unwrap(), 3);
        assert_eq!(provider.delete_many(&keys).await.unwrap(), 0);
        assert_eq!(provider.delete_many(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
