//! Client record lookup contract and its adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use apptwice_core::error::AppError;
use apptwice_core::result::AppResult;
use apptwice_database::repositories::client::ClientRepository;
use apptwice_entity::client::{Client, NewClient};

/// Lookup and registration of API clients.
#[async_trait]
pub trait ClientStore: Send + Sync + std::fmt::Debug + 'static {
    /// The client with public identifier `client_id`, if any.
    async fn find_by_client_id(&self, client_id: &str) -> AppResult<Option<Client>>;

    /// Persist a new client.
    async fn create(&self, client: NewClient) -> AppResult<Client>;
}

/// [`ClientStore`] backed by the `clients` table.
#[derive(Debug, Clone)]
pub struct PgClientStore {
    repo: Arc<ClientRepository>,
}

impl PgClientStore {
    /// Wrap a client repository.
    pub fn new(repo: Arc<ClientRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn find_by_client_id(&self, client_id: &str) -> AppResult<Option<Client>> {
        self.repo.find_by_client_id(client_id).await
    }

    async fn create(&self, client: NewClient) -> AppResult<Client> {
        self.repo.create(&client).await
    }
}

/// Process-local [`ClientStore`].
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    clients: RwLock<HashMap<String, Client>>,
}

impl MemoryClientStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_client_id(&self, client_id: &str) -> AppResult<Option<Client>> {
        Ok(self.clients.read().await.get(client_id).cloned())
    }

    async fn create(&self, client: NewClient) -> AppResult<Client> {
        let mut clients = self.clients.write().await;
        if clients.contains_key(&client.client_id) {
            return Err(AppError::conflict("client_id already registered"));
        }

        let row = Client {
            id: clients.len() as i64 + 1,
            company: client.company,
            client_id: client.client_id,
            client_secret_hash: client.client_secret_hash,
            created_at: Utc::now(),
        };
        clients.insert(row.client_id.clone(), row.clone());
        Ok(row)
    }
}
