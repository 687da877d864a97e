// ============================
// chatter-backend/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are PHC strings (`$scrypt$ln=..,r=..,p=..$salt$hash`), so the work
//! factor travels with each hash and verification does not depend on the
//! current configuration.
use scrypt::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use thiserror::Error;

use crate::config::HashSettings;

const HASH_OUTPUT_LEN: usize = 32;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The plaintext does not match the stored hash
    #[error("password does not match")]
    Mismatch,

    /// The stored hash cannot be parsed or is not an scrypt hash
    #[error("malformed password hash: {0}")]
    Malformed(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Salted scrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    params: Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::recommended(),
        }
    }
}

impl CredentialHasher {
    /// Build a hasher from configured scrypt parameters
    pub fn new(settings: &HashSettings) -> Result<Self, PasswordError> {
        let params = Params::new(settings.log_n, settings.r, settings.p, HASH_OUTPUT_LEN)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant-time.
    pub fn verify(&self, hash: &str, plain: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::Malformed(e.to_string()))?;
        Scrypt
            .verify_password(plain.as_bytes(), &parsed)
            .map_err(|e| match e {
                password_hash::Error::Password => PasswordError::Mismatch,
                other => PasswordError::Malformed(other.to_string()),
            })
    }
}
