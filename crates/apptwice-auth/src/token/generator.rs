//! Opaque refresh tokens and HS256 access tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use apptwice_core::config::auth::AuthConfig;
use apptwice_core::error::AppError;
use apptwice_entity::identity::Identity;

use crate::error::{AuthError, AuthResult};

use super::claims::AccessClaims;

/// Produces refresh tokens and signs/validates access tokens.
///
/// Construction fails with [`AuthError::SigningKeyMissing`] when no secret is
/// configured, so a running generator can always sign.
#[derive(Clone)]
pub struct TokenGenerator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    issuer: String,
    audience: String,
}

impl std::fmt::Debug for TokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGenerator")
            .field("access_ttl", &self.access_ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl TokenGenerator {
    /// Build a generator from auth configuration.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.jwt_secret.trim().is_empty() {
            return Err(AuthError::SigningKeyMissing);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
        }
        if config.audience.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(&[config.audience.as_str()]);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            access_ttl: Duration::from_secs(config.access_ttl_seconds),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        })
    }

    /// Lifetime of the access tokens this generator signs.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// A fresh opaque refresh token: hex SHA-256 over the current timestamp,
    /// a 32-byte random salt, and a v4 UUID.
    pub fn new_refresh_token(&self) -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let salt: [u8; 32] = rand::random();
        let id = Uuid::new_v4();

        let mut hasher = Sha256::new();
        hasher.update(nanos.to_be_bytes());
        hasher.update(salt);
        hasher.update(id.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Sign an access token for `subject`, embedding `refresh_token` when given.
    pub fn sign_access_token(
        &self,
        subject: &Identity,
        refresh_token: Option<&str>,
    ) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: subject.user_id,
            role: subject.role.clone(),
            jti: refresh_token.filter(|t| !t.is_empty()).map(str::to_string),
            iat: now,
            exp: now + self.access_ttl.as_secs() as i64,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Backend(AppError::internal(format!(
                "Failed to encode access token: {e}"
            )))
        })
    }

    /// Verify signature, algorithm, `exp`, `iss` and `aud`.
    ///
    /// Revocation of the embedded refresh reference is not checked here.
    pub fn validate_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::Json(_) | JwtErrorKind::MissingRequiredClaim(_) => {
                    AuthError::UnexpectedClaimsShape
                }
                JwtErrorKind::ExpiredSignature => AuthError::InvalidToken {
                    reason: "token has expired".into(),
                },
                JwtErrorKind::InvalidSignature => AuthError::InvalidToken {
                    reason: "signature mismatch".into(),
                },
                _ => AuthError::InvalidToken {
                    reason: e.to_string(),
                },
            })
    }
}
