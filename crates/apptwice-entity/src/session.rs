//! Refresh session entity model.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One active refresh credential.
///
/// A row is the unit of per-user quota counting and of ban targeting. It is
/// logically dead once `expires_in` has passed, even if the row still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// The identity that owns this session.
    pub user_id: i64,
    /// Opaque refresh token, unique across all sessions.
    pub refresh_token: String,
    /// User-Agent header recorded at creation.
    pub user_agent: String,
    /// Client address recorded at creation.
    pub ip: String,
    /// Absolute expiry.
    pub expires_in: DateTime<Utc>,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_in <= now
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining_lifetime(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_in - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    /// Owning identity.
    pub user_id: i64,
    /// Freshly generated refresh token.
    pub refresh_token: String,
    /// User-Agent header of the request.
    pub user_agent: String,
    /// Client address of the request.
    pub ip: String,
    /// Absolute expiry.
    pub expires_in: DateTime<Utc>,
}
