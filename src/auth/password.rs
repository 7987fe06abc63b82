// Password hashing and verification

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::error::AuthError;

/// Password service wrapping Argon2id hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt.
    ///
    /// The same plaintext hashed twice produces different digests; only
    /// `verify_password` can relate a plaintext to a stored digest.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored digest.
    ///
    /// Fails closed: a malformed or empty stored digest yields `Ok(false)`,
    /// never a successful match. Timing characteristics are those of the
    /// argon2 primitive itself.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
