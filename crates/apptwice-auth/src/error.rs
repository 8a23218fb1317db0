//! Error taxonomy for the session and token lifecycle.
//!
//! Backend failures arrive as [`AppError`] and are carried unchanged in
//! [`AuthError::Backend`]; everything else is a domain outcome with a stable
//! [`AuthError::code`].

use apptwice_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors produced by token, session, and gateway operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The presented refresh token has no session row.
    #[error("Refresh session not found")]
    SessionNotFound,

    /// The presented refresh token was consumed but had already expired.
    #[error("Refresh token has expired")]
    ExpiredRefreshToken,

    /// The refresh token (or the reference embedded in an access token) is banned.
    #[error("Session has been banned")]
    SessionBanned,

    /// A fresh login was attempted without an authenticated identity.
    #[error("No authenticated identity on the request")]
    EmptyIdentity,

    /// The access token signing secret is not configured.
    #[error("Access token signing key is not configured")]
    SigningKeyMissing,

    /// Signature mismatch, malformed token, or failed temporal claims.
    #[error("Invalid access token: {reason}")]
    InvalidToken {
        /// What failed during verification.
        reason: String,
    },

    /// The token verified but its claims do not deserialize.
    #[error("Access token claims have an unexpected shape")]
    UnexpectedClaimsShape,

    /// The request asked for an access type this service does not know.
    #[error("Unrecognized access type: '{0}'")]
    UnrecognizedAccessType(String),

    /// Unban removed a different number of entries than requested.
    #[error("Expected to remove {requested} revocation entries, removed {removed}")]
    UnexpectedDeletionCount {
        /// Tokens in the unban set.
        requested: usize,
        /// Entries the cache actually removed.
        removed: u64,
    },

    /// Neither the cookie nor the `Authorization` header carried a token.
    #[error("No access credential presented")]
    MissingCredential,

    /// `client_id` or `client_secret` was empty.
    #[error("client_id and client_secret are required")]
    MissingClientCredentials,

    /// `refresh_token` access type without a token.
    #[error("refresh_token is required for this access type")]
    MissingRefreshToken,

    /// Unknown client or wrong secret.
    #[error("Invalid client credentials")]
    InvalidClient,

    /// Store, cache, or timeout failure from a backend adapter.
    #[error(transparent)]
    Backend(#[from] AppError),
}

/// A specialized `Result` type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Stable machine-readable classification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "session_not_found",
            Self::ExpiredRefreshToken => "expired_refresh_token",
            Self::SessionBanned => "session_banned",
            Self::EmptyIdentity => "empty_identity",
            Self::SigningKeyMissing => "signing_key_missing",
            Self::InvalidToken { .. } => "invalid_token",
            Self::UnexpectedClaimsShape => "unexpected_claims_shape",
            Self::UnrecognizedAccessType(_) => "unrecognized_access_type",
            Self::UnexpectedDeletionCount { .. } => "unexpected_deletion_count",
            Self::MissingCredential => "missing_credential",
            Self::MissingClientCredentials => "missing_client_credentials",
            Self::MissingRefreshToken => "missing_refresh_token",
            Self::InvalidClient => "invalid_client",
            Self::Backend(e) => match e.kind {
                ErrorKind::NotFound => "not_found",
                ErrorKind::Validation => "invalid_request",
                ErrorKind::Conflict => "conflict",
                ErrorKind::ServiceUnavailable => "service_unavailable",
                _ => "internal_error",
            },
        }
    }

    /// Map a store `NotFound` to [`AuthError::SessionNotFound`], pass anything else through.
    pub(crate) fn from_session_lookup(err: AppError) -> Self {
        if err.is_not_found() {
            Self::SessionNotFound
        } else {
            Self::Backend(err)
        }
    }
}
