//! Per-user session quota policies.

use apptwice_entity::session::Session;

/// Decides which of a user's sessions to delete before a new one is created.
pub trait EvictionPolicy: Send + Sync + std::fmt::Debug + 'static {
    /// Ids to delete, given every session the user currently holds.
    fn select_evictions(&self, existing: &[Session]) -> Vec<i64>;
}

/// Deletes every session once a user holds more than `max_sessions`.
///
/// An LRU policy keeping the newest sessions would slot in through
/// [`EvictionPolicy`] without touching rotation.
#[derive(Debug, Clone, Copy)]
pub struct RevokeAllOnOverflow {
    max_sessions: usize,
}

impl RevokeAllOnOverflow {
    /// Policy that triggers above `max_sessions`.
    pub fn new(max_sessions: usize) -> Self {
        Self { max_sessions }
    }
}

impl EvictionPolicy for RevokeAllOnOverflow {
    fn select_evictions(&self, existing: &[Session]) -> Vec<i64> {
        if existing.len() > self.max_sessions {
            existing.iter().map(|s| s.id).collect()
        } else {
            Vec::new()
        }
    }
}
