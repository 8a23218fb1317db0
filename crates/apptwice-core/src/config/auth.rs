//! Access token and client credential configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for access token signing (HMAC-SHA256).
    ///
    /// Left empty by default; the server refuses to start until it is set.
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// `iss` claim stamped on and required from access tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// `aud` claim stamped on and required from access tokens.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Clock skew tolerated when validating `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Cookie that may carry the access token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Shared key for `/admin` routes. Empty disables them.
    #[serde(default)]
    pub admin_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_ttl_seconds: default_access_ttl(),
            issuer: default_issuer(),
            audience: default_audience(),
            leeway_seconds: default_leeway(),
            cookie_name: default_cookie_name(),
            admin_key: String::new(),
        }
    }
}

fn default_access_ttl() -> u64 {
    900
}

fn default_issuer() -> String {
    "apptwice".to_string()
}

fn default_audience() -> String {
    "apptwice-api".to_string()
}

fn default_leeway() -> u64 {
    5
}

fn default_cookie_name() -> String {
    "apptwice-access-token".to_string()
}
