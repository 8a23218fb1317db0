//! Request-facing façade over client approval, sessions, and tokens.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use apptwice_entity::identity::RequestOrigin;
use apptwice_entity::session::Session;

use crate::client::{ClientAuthenticator, IssuedClient};
use crate::error::{AuthError, AuthResult};
use crate::session::SessionManager;
use crate::token::{AccessClaims, TokenGenerator};

/// How an authorization request wants its credentials issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    /// Access token only, bound to no refresh session.
    Simple,
    /// Fresh login: new refresh session plus access token.
    Session,
    /// Rotate a presented refresh token.
    RefreshToken,
}

impl FromStr for AccessType {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "session" => Ok(Self::Session),
            "refresh_token" => Ok(Self::RefreshToken),
            other => Err(AuthError::UnrecognizedAccessType(other.to_string())),
        }
    }
}

/// Inbound authorization request. Absent fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessRequest {
    /// `simple`, `session`, or `refresh_token`.
    pub access_type: String,
    /// Refresh token to rotate.
    pub refresh_token: Option<String>,
    /// Public client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
}

/// Credentials issued by [`AuthGateway::authenticate`].
#[derive(Debug, Clone, Serialize)]
pub struct AccessGrant {
    /// Signed access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// New refresh token, absent for `simple` grants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Outcome of an administrative ban.
#[derive(Debug, Clone)]
pub struct BanReport {
    /// Sessions whose refresh tokens were banned.
    pub sessions: Vec<Session>,
    /// When the ban was applied.
    pub at: DateTime<Utc>,
}

/// Outcome of an administrative unban.
#[derive(Debug, Clone)]
pub struct UnbanReport {
    /// Tokens removed from the revocation list.
    pub tokens: Vec<String>,
    /// Entries actually removed.
    pub removed: u64,
    /// When the unban was applied.
    pub at: DateTime<Utc>,
}

/// Authenticates inbound credentials, issues credential pairs, and exposes
/// ban/unban administration.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    clients: Arc<ClientAuthenticator>,
    sessions: Arc<SessionManager>,
    tokens: Arc<TokenGenerator>,
}

impl AuthGateway {
    /// Creates a gateway over its collaborators.
    pub fn new(
        clients: Arc<ClientAuthenticator>,
        sessions: Arc<SessionManager>,
        tokens: Arc<TokenGenerator>,
    ) -> Self {
        Self {
            clients,
            sessions,
            tokens,
        }
    }

    /// Approve the client, then issue credentials according to `access_type`.
    pub async fn authenticate(
        &self,
        request: AccessRequest,
        origin: &RequestOrigin,
    ) -> AuthResult<AccessGrant> {
        let identity = self
            .clients
            .approve(&request.client_id, &request.client_secret)
            .await?;

        let refresh_token = match request.access_type.parse::<AccessType>()? {
            AccessType::Simple => None,
            AccessType::Session => Some(
                self.sessions
                    .start_or_rotate_session(Some(&identity), None, origin)
                    .await?,
            ),
            AccessType::RefreshToken => {
                let presented = request
                    .refresh_token
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .ok_or(AuthError::MissingRefreshToken)?;
                self.ensure_owned_by(presented, identity.user_id).await?;
                Some(
                    self.sessions
                        .start_or_rotate_session(Some(&identity), Some(presented), origin)
                        .await?,
                )
            }
        };

        let access_token = self
            .tokens
            .sign_access_token(&identity, refresh_token.as_deref())?;

        Ok(AccessGrant {
            access_token,
            token_type: "Bearer",
            expires_in: self.tokens.access_ttl().as_secs(),
            refresh_token,
        })
    }

    /// Reject a refresh token held by another user. The token is burned
    /// either way since rotation is single-use.
    async fn ensure_owned_by(&self, token: &str, user_id: i64) -> AuthResult<()> {
        let owner = self.sessions.find_session(token).await?.user_id;
        if owner == user_id {
            return Ok(());
        }

        warn!(
            user_id,
            owner, "Refresh token presented by a client that does not own it"
        );
        match self.sessions.end_session(token).await {
            Ok(_) | Err(AuthError::SessionNotFound) => Err(AuthError::SessionNotFound),
            Err(e) => Err(e),
        }
    }

    /// Validate an access token and reject it if its refresh reference is banned.
    pub async fn verify(&self, access_token: &str) -> AuthResult<AccessClaims> {
        let claims = self.tokens.validate_access_token(access_token)?;
        if let Some(reference) = claims.refresh_reference() {
            if self.sessions.is_banned(reference).await? {
                return Err(AuthError::SessionBanned);
            }
        }
        Ok(claims)
    }

    /// Revoke the session holding `refresh_token`.
    pub async fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        self.sessions.end_session(refresh_token).await.map(|_| ())
    }

    /// Ban every session of `user_id` plus the sessions holding `tokens`.
    ///
    /// Any explicit token without a session aborts before anything is banned.
    pub async fn ban(
        &self,
        user_id: Option<i64>,
        tokens: &[String],
        ttl: Option<Duration>,
    ) -> AuthResult<BanReport> {
        let mut targets = match user_id {
            Some(id) => self.sessions.sessions_for_user(id).await?,
            None => Vec::new(),
        };
        for token in tokens {
            targets.push(self.sessions.find_session(token).await?);
        }

        let mut seen = HashSet::new();
        targets.retain(|s| seen.insert(s.id));

        self.sessions.ban(&targets, ttl).await?;
        Ok(BanReport {
            sessions: targets,
            at: Utc::now(),
        })
    }

    /// Lift bans for every session of `user_id` plus the explicit `tokens`.
    ///
    /// Fails with [`AuthError::UnexpectedDeletionCount`] when fewer entries
    /// existed than were named; the entries that did exist stay removed.
    pub async fn unban(&self, user_id: Option<i64>, tokens: &[String]) -> AuthResult<UnbanReport> {
        let mut targets: Vec<String> = match user_id {
            Some(id) => self
                .sessions
                .sessions_for_user(id)
                .await?
                .into_iter()
                .map(|s| s.refresh_token)
                .collect(),
            None => Vec::new(),
        };
        targets.extend(tokens.iter().cloned());

        let mut seen = HashSet::new();
        targets.retain(|t| seen.insert(t.clone()));

        let removed = self.sessions.unban(&targets).await?;
        if removed != targets.len() as u64 {
            warn!(
                requested = targets.len(),
                removed, "Unban removed fewer entries than requested"
            );
            return Err(AuthError::UnexpectedDeletionCount {
                requested: targets.len(),
                removed,
            });
        }

        info!(count = removed, "Unban applied");
        Ok(UnbanReport {
            tokens: targets,
            removed,
            at: Utc::now(),
        })
    }

    /// Register a new API client.
    pub async fn register_client(&self, company: &str) -> AuthResult<IssuedClient> {
        self.clients.register(company).await
    }
}
