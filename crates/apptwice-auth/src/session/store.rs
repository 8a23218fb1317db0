//! Session persistence contract and its PostgreSQL adapter.

use std::sync::Arc;

use async_trait::async_trait;

use apptwice_core::error::AppError;
use apptwice_core::result::AppResult;
use apptwice_database::repositories::session::SessionRepository;
use apptwice_entity::session::{NewSession, Session};

/// CRUD over refresh session rows.
///
/// Lookups by token report a missing row as `ErrorKind::NotFound`.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new session and return it with its id and creation time.
    async fn create(&self, session: NewSession) -> AppResult<Session>;

    /// Fetch the session holding `token`.
    async fn fetch_by_token(&self, token: &str) -> AppResult<Session>;

    /// Atomically delete the session holding `token` and return the deleted row.
    async fn delete_by_token(&self, token: &str) -> AppResult<Session>;

    /// Delete sessions by id. An empty batch is a no-op.
    async fn delete_batch(&self, ids: &[i64]) -> AppResult<()>;

    /// Every session row owned by `user_id`.
    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Session>>;
}

/// [`SessionStore`] backed by the `refresh_sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    repo: Arc<SessionRepository>,
}

impl PgSessionStore {
    /// Wrap a session repository.
    pub fn new(repo: Arc<SessionRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, session: NewSession) -> AppResult<Session> {
        self.repo.create(&session).await
    }

    async fn fetch_by_token(&self, token: &str) -> AppResult<Session> {
        self.repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Refresh session not found"))
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<Session> {
        self.repo
            .delete_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Refresh session not found"))
    }

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<()> {
        self.repo.delete_by_ids(ids).await.map(|_| ())
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        self.repo.find_by_user(user_id).await
    }
}
