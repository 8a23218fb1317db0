//! Claims carried by every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the owning user (client) id.
    pub sub: i64,
    /// Role at issuance.
    pub role: String,
    /// Refresh token the access token was minted alongside. Absent for
    /// `simple` grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
}

impl AccessClaims {
    /// The user id from the subject claim.
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    /// The embedded refresh token, if the grant created or rotated a session.
    pub fn refresh_reference(&self) -> Option<&str> {
        self.jti.as_deref().filter(|t| !t.is_empty())
    }

    /// Expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
