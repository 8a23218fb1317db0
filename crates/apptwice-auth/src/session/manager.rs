//! Refresh session lifecycle: creation, rotation, quota, and bans.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tracing::{debug, info, warn};

use apptwice_core::config::session::SessionConfig;
use apptwice_core::result::AppResult;
use apptwice_entity::identity::{Identity, RequestOrigin};
use apptwice_entity::session::{NewSession, Session};

use crate::deadline::within;
use crate::error::{AuthError, AuthResult};
use crate::revocation::RevocationList;
use crate::token::TokenGenerator;

use super::eviction::{EvictionPolicy, RevokeAllOnOverflow};
use super::store::SessionStore;

/// Orchestrates refresh sessions over a [`SessionStore`] and a [`RevocationList`].
///
/// Every backend call is bounded by `session.operation_timeout_ms`.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    revocations: Arc<dyn RevocationList>,
    tokens: Arc<TokenGenerator>,
    eviction: Arc<dyn EvictionPolicy>,
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("eviction", &self.eviction)
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager using the revoke-all-on-overflow quota.
    pub fn new(
        store: Arc<dyn SessionStore>,
        revocations: Arc<dyn RevocationList>,
        tokens: Arc<TokenGenerator>,
        config: SessionConfig,
    ) -> Self {
        let eviction = Arc::new(RevokeAllOnOverflow::new(config.max_sessions_per_user));
        Self {
            store,
            revocations,
            tokens,
            eviction,
            config,
        }
    }

    /// Replace the quota eviction policy.
    pub fn with_eviction_policy(mut self, policy: Arc<dyn EvictionPolicy>) -> Self {
        self.eviction = policy;
        self
    }

    /// Issue a new refresh token, either for a fresh login or by rotating
    /// `presented_token`.
    ///
    /// Rotation consumes the presented token before anything else is checked,
    /// so an expired or banned token cannot be replayed. Expiry is checked
    /// before ban status: a token that is both reports `ExpiredRefreshToken`.
    pub async fn start_or_rotate_session(
        &self,
        identity: Option<&Identity>,
        presented_token: Option<&str>,
        origin: &RequestOrigin,
    ) -> AuthResult<String> {
        let presented_token = presented_token.filter(|t| !t.is_empty());

        // Step 1: Resolve the owning user
        let user_id = match presented_token {
            Some(token) => self.consume(token).await?.user_id,
            None => identity.ok_or(AuthError::EmptyIdentity)?.user_id,
        };

        // Step 2: Enforce the per-user quota
        self.enforce_quota(user_id).await?;

        // Step 3: Create the replacement session
        let new_session = NewSession {
            user_id,
            refresh_token: self.tokens.new_refresh_token(),
            user_agent: origin.user_agent.clone(),
            ip: origin.ip.clone(),
            expires_in: Utc::now() + TimeDelta::seconds(self.config.refresh_ttl().as_secs() as i64),
        };
        let session = self
            .bounded("create session", self.store.create(new_session))
            .await?;

        info!(
            user_id,
            session_id = session.id,
            rotated = presented_token.is_some(),
            "Refresh session issued"
        );
        Ok(session.refresh_token)
    }

    /// Whether `token` is on the revocation list.
    pub async fn is_banned(&self, token: &str) -> AuthResult<bool> {
        let banned = self
            .bounded("check revocation", self.revocations.is_banned(token))
            .await?;
        Ok(banned)
    }

    /// Ban each session's refresh token, recording the session id.
    ///
    /// `ttl` applies to every entry when given. Otherwise each entry lives for
    /// the session's remaining lifetime, floored at `min_ban_ttl_seconds`.
    /// The first failure aborts the batch; entries written before it stay.
    pub async fn ban(&self, sessions: &[Session], ttl: Option<Duration>) -> AuthResult<()> {
        let now = Utc::now();
        for session in sessions {
            let entry_ttl = ttl.unwrap_or_else(|| {
                session
                    .remaining_lifetime(now)
                    .max(self.config.min_ban_ttl())
            });
            self.bounded(
                "ban refresh token",
                self.revocations
                    .ban(&session.refresh_token, session.id, entry_ttl),
            )
            .await?;
            debug!(
                session_id = session.id,
                ttl_secs = entry_ttl.as_secs(),
                "Session banned"
            );
        }

        info!(count = sessions.len(), "Sessions banned");
        Ok(())
    }

    /// Remove bans. Returns how many entries existed.
    pub async fn unban(&self, tokens: &[String]) -> AuthResult<u64> {
        if tokens.is_empty() {
            return Ok(0);
        }
        let removed = self
            .bounded("unban refresh tokens", self.revocations.unban(tokens))
            .await?;
        info!(requested = tokens.len(), removed, "Refresh tokens unbanned");
        Ok(removed)
    }

    /// Delete the session holding `token` (logout).
    pub async fn end_session(&self, token: &str) -> AuthResult<Session> {
        let session = self
            .bounded("delete session", self.store.delete_by_token(token))
            .await
            .map_err(AuthError::from_session_lookup)?;
        info!(user_id = session.user_id, session_id = session.id, "Session ended");
        Ok(session)
    }

    /// The session holding `token`.
    pub async fn find_session(&self, token: &str) -> AuthResult<Session> {
        self.bounded("fetch session", self.store.fetch_by_token(token))
            .await
            .map_err(AuthError::from_session_lookup)
    }

    /// Every session owned by `user_id`.
    pub async fn sessions_for_user(&self, user_id: i64) -> AuthResult<Vec<Session>> {
        let sessions = self
            .bounded("list sessions", self.store.list_by_user(user_id))
            .await?;
        Ok(sessions)
    }

    /// Atomically delete the presented session, then reject it if expired or banned.
    async fn consume(&self, token: &str) -> AuthResult<Session> {
        let session = self
            .bounded("delete session", self.store.delete_by_token(token))
            .await
            .map_err(AuthError::from_session_lookup)?;

        if session.is_expired_at(Utc::now()) {
            warn!(session_id = session.id, "Expired refresh token presented");
            return Err(AuthError::ExpiredRefreshToken);
        }

        if self.is_banned(token).await? {
            warn!(session_id = session.id, "Banned refresh token presented");
            return Err(AuthError::SessionBanned);
        }

        Ok(session)
    }

    /// Apply the eviction policy to the user's current sessions.
    ///
    /// Not atomic with the create that follows: concurrent logins for one
    /// user may briefly exceed the quota.
    async fn enforce_quota(&self, user_id: i64) -> AuthResult<()> {
        let existing = self.sessions_for_user(user_id).await?;
        let evict = self.eviction.select_evictions(&existing);
        if evict.is_empty() {
            return Ok(());
        }

        self.bounded("evict sessions", self.store.delete_batch(&evict))
            .await?;
        info!(
            user_id,
            held = existing.len(),
            evicted = evict.len(),
            "Session quota exceeded, sessions evicted"
        );
        Ok(())
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        within(self.config.operation_timeout(), operation, fut).await
    }
}
