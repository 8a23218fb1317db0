//! Refresh session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Refresh session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of a refresh session in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Sessions a user may hold before the eviction policy runs.
    #[serde(default = "default_max_sessions")]
    pub max_sessions_per_user: usize,
    /// Lower bound for a ban TTL derived from a session's remaining lifetime.
    #[serde(default = "default_min_ban_ttl")]
    pub min_ban_ttl_seconds: u64,
    /// Upper bound for each store or cache call, in milliseconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_ms: u64,
    /// Backend that holds session rows and client records.
    #[serde(default)]
    pub store: StoreBackend,
}

impl SessionConfig {
    /// Refresh session lifetime as a [`Duration`].
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl_days * 24 * 60 * 60)
    }

    /// Per-call deadline as a [`Duration`].
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Minimum ban TTL as a [`Duration`].
    pub fn min_ban_ttl(&self) -> Duration {
        Duration::from_secs(self.min_ban_ttl_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_ttl_days: default_refresh_ttl(),
            max_sessions_per_user: default_max_sessions(),
            min_ban_ttl_seconds: default_min_ban_ttl(),
            operation_timeout_ms: default_operation_timeout(),
            store: StoreBackend::default(),
        }
    }
}

/// Storage backend for session rows and client records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// PostgreSQL through the shared connection pool.
    #[default]
    Postgres,
    /// Process-local maps. Single node, lost on restart.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

fn default_refresh_ttl() -> u64 {
    30
}

fn default_max_sessions() -> usize {
    5
}

fn default_min_ban_ttl() -> u64 {
    60
}

fn default_operation_timeout() -> u64 {
    3000
}
