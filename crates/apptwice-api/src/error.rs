//! Maps `AuthError` and request-shape failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use apptwice_auth::AuthError;
use apptwice_core::error::{AppError, ErrorKind};

/// Standard API error response body. Built fresh for every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Numeric HTTP status.
    pub status: u16,
    /// Machine-readable error code.
    pub error: String,
    /// Optional detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
}

/// Every failure an HTTP handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain or backend failure from the auth layer.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The body could not be decoded as JSON or form data.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The body decoded but failed field validation.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Admin credentials missing, wrong, or admin routes disabled.
    #[error("{0}")]
    Forbidden(&'static str),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::Auth(AuthError::Backend(err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ApiError {
    /// HTTP status and stable error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MalformedBody(_) => (StatusCode::BAD_REQUEST, "malformed_request"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::Auth(err) => (auth_status(err), err.code()),
        }
    }
}

fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::UnrecognizedAccessType(_)
        | AuthError::MissingClientCredentials
        | AuthError::MissingRefreshToken => StatusCode::BAD_REQUEST,
        AuthError::MissingCredential
        | AuthError::InvalidToken { .. }
        | AuthError::UnexpectedClaimsShape
        | AuthError::InvalidClient
        | AuthError::SessionNotFound
        | AuthError::ExpiredRefreshToken
        | AuthError::SessionBanned
        | AuthError::EmptyIdentity => StatusCode::UNAUTHORIZED,
        AuthError::UnexpectedDeletionCount { .. } => StatusCode::CONFLICT,
        AuthError::SigningKeyMissing => StatusCode::INTERNAL_SERVER_ERROR,
        AuthError::Backend(e) => match e.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let additional = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
            None
        } else {
            Some(self.to_string())
        };

        let body = ApiErrorResponse {
            status: status.as_u16(),
            error: code.to_string(),
            additional,
        };

        (status, Json(body)).into_response()
    }
}
