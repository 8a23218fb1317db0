//! API client (company) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered API client. Its `id` is the identity that owns sessions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// Display name of the owning company.
    pub company: String,
    /// Public client identifier.
    pub client_id: String,
    /// Argon2id hash of the client secret.
    #[serde(skip_serializing)]
    pub client_secret_hash: String,
    /// When the client was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a new client.
#[derive(Debug, Clone)]
pub struct NewClient {
    /// Display name of the owning company.
    pub company: String,
    /// Public client identifier.
    pub client_id: String,
    /// Argon2id hash of the client secret.
    pub client_secret_hash: String,
}
