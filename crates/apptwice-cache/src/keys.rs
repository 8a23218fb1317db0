//! Cache key builders for all AppTwice cache entries.

/// Prefix applied to all AppTwice cache keys.
const PREFIX: &str = "apptwice";

/// Cache key for a revoked (banned) refresh token.
pub fn revoked_refresh_token(token: &str) -> String {
    format!("{PREFIX}:revoked:refresh:{token}")
}
