//! # apptwice-database
//!
//! PostgreSQL connection management and the repositories behind refresh
//! sessions and API clients.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
