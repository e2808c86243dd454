// Password hashing and verification

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Password service wrapping Argon2id
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt
    ///
    /// Fails only when the transform itself errors; that is unexpected and
    /// surfaces as a 500.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!("argon2 hash_password error: {}", e);
                AuthError::PasswordHashError
            })?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash
    ///
    /// A mismatch is `Ok(false)`, never an error. A malformed stored hash is
    /// an internal failure.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!("argon2 hash parse error: {}", e);
            AuthError::PasswordHashError
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
