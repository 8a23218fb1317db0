//! # apptwice-api
//!
//! HTTP API layer for AppTwice built on Axum.
//!
//! Exposes the authorization, logout, and introspection endpoints, the
//! key-protected admin endpoints for bans and client registration, and the
//! health probe. Every failure is rendered through [`error::ApiError`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_state;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
