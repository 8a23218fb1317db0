//! Refresh token generation and access token signing/validation.

pub mod claims;
pub mod generator;

pub use claims::AccessClaims;
pub use generator::TokenGenerator;
