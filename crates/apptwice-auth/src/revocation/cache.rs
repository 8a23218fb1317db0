//! [`RevocationList`] over the shared cache provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use apptwice_cache::keys;
use apptwice_cache::provider::CacheManager;
use apptwice_core::result::AppResult;
use apptwice_core::traits::cache::CacheProvider;

use super::RevocationList;

/// Bans stored as `apptwice:revoked:refresh:{token}` -> session id.
#[derive(Debug, Clone)]
pub struct CacheRevocationList {
    cache: Arc<CacheManager>,
}

impl CacheRevocationList {
    /// Wrap a cache manager.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl RevocationList for CacheRevocationList {
    async fn ban(&self, token: &str, session_id: i64, ttl: Duration) -> AppResult<()> {
        let key = keys::revoked_refresh_token(token);
        let inserted = self
            .cache
            .set_nx(&key, &session_id.to_string(), ttl)
            .await?;
        if !inserted {
            debug!(session_id, "Refresh token already banned");
        }
        Ok(())
    }

    async fn is_banned(&self, token: &str) -> AppResult<bool> {
        self.cache.exists(&keys::revoked_refresh_token(token)).await
    }

    async fn unban(&self, tokens: &[String]) -> AppResult<u64> {
        let keys: Vec<String> = tokens
            .iter()
            .map(|t| keys::revoked_refresh_token(t))
            .collect();
        self.cache.delete_many(&keys).await
    }
}
