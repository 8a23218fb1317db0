//! # apptwice-entity
//!
//! Domain entity models for AppTwice. Database entities derive
//! `sqlx::FromRow`; request-scoped value objects live in [`identity`].

pub mod client;
pub mod identity;
pub mod session;

pub use client::{Client, NewClient};
pub use identity::{Identity, RequestOrigin};
pub use session::{NewSession, Session};
