//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ban or unban target set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TokenListRequest {
    /// Every session of this user is targeted.
    pub user_id: Option<i64>,
    /// Explicit refresh tokens.
    #[validate(length(max = 1000))]
    pub tokens: Vec<String>,
    /// Ban lifetime in seconds. Ignored by unban.
    #[validate(range(min = 1))]
    pub ttl: Option<u64>,
}

/// Logout body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    /// Refresh token of the session to end.
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Client registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterClientRequest {
    /// Owning company name.
    #[validate(length(min = 1, max = 255))]
    pub company: String,
}
