//! Password verification
//!
//! Salted-hash comparison used by the authenticator, plus hashing for
//! populating credential stores.

use crate::error::AuthResult;
use log::debug;

/// Compares a plaintext password against a stored salted hash.
pub trait PasswordVerifier {
    /// Returns `true` only if `password` matches `hash`. A malformed hash is a
    /// mismatch, not an error.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// bcrypt verification (salted, constant-time comparison).
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptVerifier;

impl PasswordVerifier for BcryptVerifier {
    fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matched) => matched,
            Err(e) => {
                debug!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}

impl<V: PasswordVerifier + ?Sized> PasswordVerifier for &V {
    fn verify(&self, password: &str, hash: &str) -> bool {
        (**self).verify(password, hash)
    }
}

/// Hash `password` with bcrypt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> AuthResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}
