//! Argon2id hashing for client secrets.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use apptwice_core::error::AppError;
use apptwice_core::result::AppResult;

/// Hashes and verifies client secrets with Argon2id.
#[derive(Debug, Clone, Default)]
pub struct SecretHasher;

impl SecretHasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext secret with a random salt (PHC string format).
    pub fn hash(&self, secret: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Secret hashing failed: {e}")))
    }

    /// `Ok(false)` on mismatch; `Err` only for a corrupt stored hash.
    pub fn verify(&self, secret: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid secret hash format: {e}")))?;

        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Secret verification failed: {e}"
            ))),
        }
    }
}
