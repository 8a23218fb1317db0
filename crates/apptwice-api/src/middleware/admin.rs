//! Admin key check for `/admin/*` routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the administrative key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Rejects requests whose `X-Admin-Key` does not match `auth.admin_key`.
///
/// With no key configured every admin request is refused.
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = state.config.auth.admin_key.as_str();
    if expected.is_empty() {
        return Err(ApiError::Forbidden("Admin endpoints are disabled"));
    }

    let presented = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
        warn!(path = %request.uri().path(), "Rejected admin request");
        return Err(ApiError::Forbidden("Invalid admin key"));
    }

    Ok(next.run(request).await)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret-longer"));
    }
}
