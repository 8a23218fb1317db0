//! Concrete repositories over the PostgreSQL pool.

pub mod client;
pub mod session;

pub use client::ClientRepository;
pub use session::SessionRepository;
