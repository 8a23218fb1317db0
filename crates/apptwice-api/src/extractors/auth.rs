//! `AuthUser` extractor: finds the access token, verifies it, and injects its claims.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use apptwice_auth::{AccessClaims, AuthError};

use crate::error::ApiError;
use crate::state::AppState;

/// Verified access claims of the calling client.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AccessClaims);

impl std::ops::Deref for AuthUser {
    type Target = AccessClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(parts, &state.config.auth.cookie_name)
            .ok_or(AuthError::MissingCredential)?;

        let claims = state.gateway.verify(&token).await?;
        Ok(AuthUser(claims))
    }
}

/// Cookie first, then `Authorization: Bearer`.
fn access_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(cookie_name).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let parts = parts(
            Request::builder()
                .header("cookie", "session-cookie=from-cookie")
                .header("authorization", "Bearer from-header"),
        );
        assert_eq!(
            access_token(&parts, "session-cookie").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_bearer_header_fallback() {
        let parts = parts(Request::builder().header("authorization", "Bearer from-header"));
        assert_eq!(
            access_token(&parts, "session-cookie").as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_absent_credentials() {
        let parts = parts(Request::builder().header("authorization", "Basic dXNlcjpwYXNz"));
        assert!(access_token(&parts, "session-cookie").is_none());
    }
}
