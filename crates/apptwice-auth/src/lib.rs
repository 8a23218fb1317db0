//! # apptwice-auth
//!
//! Session and token lifecycle for the AppTwice API.
//!
//! ## Modules
//!
//! - `token`: refresh token generation and access token signing/validation
//! - `session`: the `SessionStore` contract, quota eviction, and `SessionManager`
//! - `revocation`: the `RevocationList` contract and its cache-backed adapter
//! - `client`: API client approval and registration
//! - `gateway`: the request-facing `AuthGateway`

pub mod client;
pub mod deadline;
pub mod error;
pub mod gateway;
pub mod revocation;
pub mod session;
pub mod token;

pub use client::{ClientAuthenticator, ClientStore, IssuedClient};
pub use error::{AuthError, AuthResult};
pub use gateway::{AccessGrant, AccessRequest, AccessType, AuthGateway, BanReport, UnbanReport};
pub use revocation::{CacheRevocationList, RevocationList};
pub use session::{EvictionPolicy, RevokeAllOnOverflow, SessionManager, SessionStore};
pub use token::{AccessClaims, TokenGenerator};
