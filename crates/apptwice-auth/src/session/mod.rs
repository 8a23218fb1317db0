//! Refresh session persistence contract, quota eviction, and lifecycle.

pub mod eviction;
pub mod manager;
pub mod memory;
pub mod store;

pub use eviction::{EvictionPolicy, RevokeAllOnOverflow};
pub use manager::SessionManager;
pub use memory::MemorySessionStore;
pub use store::{PgSessionStore, SessionStore};
