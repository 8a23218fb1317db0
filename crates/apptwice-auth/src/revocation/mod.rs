//! Refresh token blacklist contract and its cache-backed adapter.

pub mod cache;

use std::time::Duration;

use async_trait::async_trait;

use apptwice_core::result::AppResult;

pub use cache::CacheRevocationList;

/// TTL-bounded set of banned refresh tokens.
#[async_trait]
pub trait RevocationList: Send + Sync + std::fmt::Debug + 'static {
    /// Ban `token` for `ttl`, recording the session it came from.
    ///
    /// Insert-if-absent: banning an already-banned token succeeds and keeps
    /// the existing entry.
    async fn ban(&self, token: &str, session_id: i64, ttl: Duration) -> AppResult<()>;

    /// Whether a live ban exists. A missing entry is `Ok(false)`.
    async fn is_banned(&self, token: &str) -> AppResult<bool>;

    /// Remove bans, returning how many entries actually existed.
    async fn unban(&self, tokens: &[String]) -> AppResult<u64>;
}
