//! Process-local [`SessionStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use apptwice_core::error::AppError;
use apptwice_core::result::AppResult;
use apptwice_entity::session::{NewSession, Session};

use super::store::SessionStore;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    by_token: HashMap<String, Session>,
}

/// Session rows keyed by refresh token behind a single mutex.
///
/// Each operation holds the lock for its whole duration, which gives
/// `delete_by_token` the same fetch-and-delete atomicity as
/// `DELETE ... RETURNING`.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<State>,
}

impl MemorySessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: NewSession) -> AppResult<Session> {
        let mut state = self.state.lock().await;
        if state.by_token.contains_key(&session.refresh_token) {
            return Err(AppError::conflict("Refresh token already exists"));
        }

        state.next_id += 1;
        let row = Session {
            id: state.next_id,
            user_id: session.user_id,
            refresh_token: session.refresh_token,
            user_agent: session.user_agent,
            ip: session.ip,
            expires_in: session.expires_in,
            created_at: Utc::now(),
        };
        state.by_token.insert(row.refresh_token.clone(), row.clone());
        Ok(row)
    }

    async fn fetch_by_token(&self, token: &str) -> AppResult<Session> {
        self.state
            .lock()
            .await
            .by_token
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::not_found("Refresh session not found"))
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<Session> {
        self.state
            .lock()
            .await
            .by_token
            .remove(token)
            .ok_or_else(|| AppError::not_found("Refresh session not found"))
    }

    async fn delete_batch(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.state
            .lock()
            .await
            .by_token
            .retain(|_, session| !ids.contains(&session.id));
        Ok(())
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        let state = self.state.lock().await;
        let mut sessions: Vec<Session> = state
            .by_token
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }
}
