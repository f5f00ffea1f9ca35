//! Credential authenticator
//!
//! Checks a candidate username/password pair against a [`UserLookup`] and
//! yields the resolved identity or `Identity::Guest`.

use std::fmt;

use log::{debug, info};

use super::lookup::UserLookup;
use super::verifier::{BcryptVerifier, PasswordVerifier};
use crate::identity::Identity;

/// Authentication adapter for a single login attempt.
///
/// Unknown usernames and wrong passwords produce the same `Identity::Guest`,
/// so callers cannot tell which one happened.
pub struct CredentialAuthenticator<L, V = BcryptVerifier> {
    lookup: L,
    verifier: V,
    username: String,
    password: String,
}

impl<L: UserLookup> CredentialAuthenticator<L> {
    /// Authenticator using bcrypt verification.
    pub fn new(lookup: L) -> Self {
        Self::with_verifier(lookup, BcryptVerifier)
    }
}

impl<L: UserLookup, V: PasswordVerifier> CredentialAuthenticator<L, V> {
    pub fn with_verifier(lookup: L, verifier: V) -> Self {
        Self {
            lookup,
            verifier,
            username: String::new(),
            password: String::new(),
        }
    }

    /// Build an authenticator with the candidate credentials already set.
    pub fn with_credentials(
        lookup: L,
        verifier: V,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut auth = Self::with_verifier(lookup, verifier);
        auth.set_username(username);
        auth.set_password(password);
        auth
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Reset both candidate fields before reusing the authenticator.
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }

    /// Check the candidate credentials.
    ///
    /// Calls the lookup exactly once. The verifier is not consulted when the
    /// user is unknown. Errors from the lookup are returned untouched.
    pub fn authenticate(&self) -> Result<Identity, L::Error> {
        let identity = self.lookup.lookup(&self.username)?;

        let verified = match &identity {
            Identity::Authenticated(user) => {
                self.verifier.verify(&self.password, user.password_hash())
            }
            Identity::Guest => false,
        };

        if !verified {
            debug!("Authentication failed for user: {}", self.username);
            return Ok(Identity::Guest);
        }

        info!("User authenticated: {}", self.username);
        Ok(identity)
    }
}

impl<L, V> fmt::Debug for CredentialAuthenticator<L, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialAuthenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}
