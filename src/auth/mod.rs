//! Authentication system
//!
//! Credential checking against a user lookup, with injectable password
//! verification.

pub mod adapter;
pub mod lookup;
pub mod verifier;

pub use adapter::CredentialAuthenticator;
pub use lookup::{InMemoryUserLookup, UserLookup};
pub use verifier::{BcryptVerifier, PasswordVerifier, hash_password};
