//! Client credential approval.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use apptwice_entity::client::{Client, NewClient};
use apptwice_entity::identity::Identity;

use crate::deadline::within;
use crate::error::{AuthError, AuthResult};

use super::secret::SecretHasher;
use super::store::ClientStore;

/// A freshly registered client. `client_secret` is only ever returned here.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedClient {
    /// The stored client record.
    pub client: Client,
    /// Plaintext secret.
    pub client_secret: String,
}

/// Approves `client_id`/`client_secret` pairs and registers new clients.
#[derive(Debug, Clone)]
pub struct ClientAuthenticator {
    store: Arc<dyn ClientStore>,
    hasher: SecretHasher,
    operation_timeout: Duration,
}

impl ClientAuthenticator {
    /// Creates an authenticator over `store`, bounding each lookup by
    /// `operation_timeout`.
    pub fn new(store: Arc<dyn ClientStore>, operation_timeout: Duration) -> Self {
        Self {
            store,
            hasher: SecretHasher::new(),
            operation_timeout,
        }
    }

    /// Verify the pair and return the client's identity.
    ///
    /// Unknown clients and wrong secrets both yield [`AuthError::InvalidClient`].
    pub async fn approve(&self, client_id: &str, client_secret: &str) -> AuthResult<Identity> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(AuthError::MissingClientCredentials);
        }

        let lookup = self.store.find_by_client_id(client_id);
        let Some(client) = within(self.operation_timeout, "find client", lookup).await? else {
            warn!(client_id, "Unknown client");
            return Err(AuthError::InvalidClient);
        };

        if !self.hasher.verify(client_secret, &client.client_secret_hash)? {
            warn!(client_id, "Client secret mismatch");
            return Err(AuthError::InvalidClient);
        }

        Ok(Identity::user(client.id))
    }

    /// Register a client for `company` with generated credentials.
    pub async fn register(&self, company: &str) -> AuthResult<IssuedClient> {
        let client_id = generate_client_id();
        let client_secret = generate_client_secret();

        let new_client = NewClient {
            company: company.to_string(),
            client_id,
            client_secret_hash: self.hasher.hash(&client_secret)?,
        };
        let client = within(
            self.operation_timeout,
            "create client",
            self.store.create(new_client),
        )
        .await?;

        info!(client_id = %client.client_id, company, "Client registered");
        Ok(IssuedClient {
            client,
            client_secret,
        })
    }
}

/// 32 hex chars derived from a v4 UUID.
fn generate_client_id() -> String {
    let digest = Sha256::digest(Uuid::new_v4().as_bytes());
    hex::encode(&digest[..16])
}

/// 64 hex chars of fresh randomness.
fn generate_client_secret() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}
