//! Cache provider trait for pluggable caching backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for TTL-capable key/value backends (Redis or in-memory).
///
/// Values are plain strings. Every entry written through this trait carries
/// its own TTL, and an entry past its TTL must behave exactly like a missing
/// key for every read operation.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Set a value only if the key does not already exist (NX).
    /// Returns `true` if the value was set, `false` if the key already existed.
    /// A backend that cannot store the entry must return an error rather than
    /// report success.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Check whether a live entry exists for the key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Delete a batch of keys, returning how many live entries were removed.
    ///
    /// An empty batch removes nothing and returns `0`.
    async fn delete_many(&self, keys: &[String]) -> AppResult<u64>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
