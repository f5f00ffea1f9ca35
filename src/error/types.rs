//! Error types
//!
//! Failed logins are never errors: unknown users and bad passwords both come
//! back as `Identity::Guest`. These types cover the surrounding plumbing.

use std::io;
use thiserror::Error;

/// Errors raised while building lookups, hashing passwords or loading config.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Duplicate user in credential store: {0}")]
    DuplicateUser(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
