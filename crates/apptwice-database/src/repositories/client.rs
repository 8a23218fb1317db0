//! API client repository implementation.

use sqlx::PgPool;

use apptwice_core::error::{AppError, ErrorKind};
use apptwice_core::result::AppResult;
use apptwice_entity::client::{Client, NewClient};

/// Repository for `clients` rows.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a client by its public identifier.
    pub async fn find_by_client_id(&self, client_id: &str) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE client_id = $1")
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find client", e))
    }

    /// Insert a new client.
    pub async fn create(&self, data: &NewClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (company, client_id, client_secret_hash) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.company)
        .bind(&data.client_id)
        .bind(&data.client_secret_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create client", e))
    }
}
