//! Axum middleware stack.

pub mod admin;
pub mod logging;
