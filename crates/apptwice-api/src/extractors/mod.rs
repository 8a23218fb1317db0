//! Custom Axum extractors.

pub mod auth;
pub mod body;
pub mod origin;

pub use auth::AuthUser;
pub use body::{JsonBody, JsonOrForm};
pub use origin::ClientOrigin;
