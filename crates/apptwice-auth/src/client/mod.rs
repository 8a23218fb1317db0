//! API client approval and registration.

pub mod authenticator;
pub mod secret;
pub mod store;

pub use authenticator::{ClientAuthenticator, IssuedClient};
pub use secret::SecretHasher;
pub use store::{ClientStore, MemoryClientStore, PgClientStore};
