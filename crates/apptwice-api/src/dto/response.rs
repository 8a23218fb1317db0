//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a ban or unban.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanInfo<T> {
    /// `ban` or `unban`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Number of affected entries.
    pub count: usize,
    /// Banned sessions or unbanned tokens.
    pub tokens: T,
    /// When the operation was applied.
    pub at: DateTime<Utc>,
}

/// Verified claims of the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: i64,
    pub role: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health probe result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the revocation cache answered.
    pub cache: bool,
}
