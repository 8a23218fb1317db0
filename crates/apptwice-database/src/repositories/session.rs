//! Refresh session repository implementation.

use sqlx::PgPool;

use apptwice_core::error::{AppError, ErrorKind};
use apptwice_core::result::AppResult;
use apptwice_entity::session::{NewSession, Session};

/// Repository for `refresh_sessions` rows.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new session.
    ///
    /// A duplicate refresh token violates the unique index and is reported as
    /// `Conflict`, never retried.
    pub async fn create(&self, data: &NewSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO refresh_sessions (user_id, refresh_token, user_agent, ip, expires_in) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.refresh_token)
        .bind(&data.user_agent)
        .bind(&data.ip)
        .bind(data.expires_in)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                AppError::with_source(ErrorKind::Conflict, "Refresh token already exists", e)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create session", e)
            }
        })
    }

    /// Find a session by its refresh token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM refresh_sessions WHERE refresh_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    /// Delete a session by refresh token and return the deleted row.
    ///
    /// Single statement, so two concurrent callers cannot both receive the row.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "DELETE FROM refresh_sessions WHERE refresh_token = $1 RETURNING *",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))
    }

    /// Delete sessions by id. Returns the number of rows removed.
    pub async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM refresh_sessions WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete sessions", e)
            })?;
        Ok(result.rows_affected())
    }

    /// List every session row owned by a user, newest first.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM refresh_sessions WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user sessions", e))
    }
}
