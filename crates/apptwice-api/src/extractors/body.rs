//! Body extractors that reject with [`ApiError::MalformedBody`].

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body decoded from `application/x-www-form-urlencoded` or JSON, chosen by
/// `Content-Type`. Anything that is not a form is decoded as JSON.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

/// JSON-only body, for payloads with list fields that form encoding cannot
/// carry.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            Ok(Self(value))
        } else {
            let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
            Ok(Self(value))
        }
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
        Ok(Self(value))
    }
}
