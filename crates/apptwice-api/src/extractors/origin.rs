//! `ClientOrigin` extractor: request provenance recorded on new sessions.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::headers::{HeaderMapExt, UserAgent};

use apptwice_entity::identity::RequestOrigin;

/// User-Agent and client address of the request.
///
/// The address is the first `X-Forwarded-For` hop when present, otherwise
/// the socket peer. Both fields are empty when unknown.
#[derive(Debug, Clone)]
pub struct ClientOrigin(pub RequestOrigin);

impl<S> FromRequestParts<S> for ClientOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .typed_get::<UserAgent>()
            .map(|ua| ua.as_str().to_string())
            .unwrap_or_default();

        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .map(String::from);

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_default();

        Ok(ClientOrigin(RequestOrigin::new(user_agent, ip)))
    }
}
