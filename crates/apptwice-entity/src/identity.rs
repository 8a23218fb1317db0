//! Request-scoped identity values.

use serde::{Deserialize, Serialize};

/// Role assigned to every approved API client.
pub const DEFAULT_ROLE: &str = "user";

/// A verified caller identity attached to a request after client approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Owning user (client) id.
    pub user_id: i64,
    /// Role carried into access tokens.
    pub role: String,
}

impl Identity {
    /// Identity with the default role.
    pub fn user(user_id: i64) -> Self {
        Self {
            user_id,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Provenance of the request that creates a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOrigin {
    /// User-Agent header value, empty when absent.
    pub user_agent: String,
    /// Client IP address, empty when unknown.
    pub ip: String,
}

impl RequestOrigin {
    /// Build an origin from header values.
    pub fn new(user_agent: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ip: ip.into(),
        }
    }
}
