//! User lookup
//!
//! Resolves usernames to identities. Replaces the static credential table with
//! a store built from configuration.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use super::verifier::hash_password;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::identity::{AuthenticatedUser, Identity};

/// Resolves a username to an [`Identity`].
///
/// An unknown username is not a failure: implementations return
/// `Ok(Identity::Guest)`. `Err` is reserved for faults in the backing store
/// (for instance a remote store being unavailable). Stores that cannot fail
/// use `Infallible`.
pub trait UserLookup {
    type Error;

    fn lookup(&self, username: &str) -> Result<Identity, Self::Error>;
}

impl<L: UserLookup + ?Sized> UserLookup for &L {
    type Error = L::Error;

    fn lookup(&self, username: &str) -> Result<Identity, Self::Error> {
        (**self).lookup(username)
    }
}

impl<L: UserLookup + ?Sized> UserLookup for Box<L> {
    type Error = L::Error;

    fn lookup(&self, username: &str) -> Result<Identity, Self::Error> {
        (**self).lookup(username)
    }
}

impl<L: UserLookup + ?Sized> UserLookup for Arc<L> {
    type Error = L::Error;

    fn lookup(&self, username: &str) -> Result<Identity, Self::Error> {
        (**self).lookup(username)
    }
}

/// In-memory credential store mapping usernames to bcrypt hashes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserLookup {
    users: HashMap<String, AuthenticatedUser>,
}

impl InMemoryUserLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the users listed in configuration.
    pub fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        let mut store = Self::new();
        for entry in &config.users {
            if store.users.contains_key(&entry.username) {
                return Err(AuthError::DuplicateUser(entry.username.clone()));
            }
            store.insert(entry.username.clone(), entry.password_hash.clone());
        }
        Ok(store)
    }

    /// Add or replace a user with an already hashed password.
    pub fn insert(&mut self, username: impl Into<String>, password_hash: impl Into<String>) {
        let username = username.into();
        let user = AuthenticatedUser::new(username.clone(), password_hash);
        self.users.insert(username, user);
    }

    /// Hash `password` at `cost` and add or replace the user.
    pub fn insert_password(
        &mut self,
        username: impl Into<String>,
        password: &str,
        cost: u32,
    ) -> AuthResult<()> {
        let hash = hash_password(password, cost)?;
        self.insert(username, hash);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserLookup for InMemoryUserLookup {
    type Error = Infallible;

    fn lookup(&self, username: &str) -> Result<Identity, Self::Error> {
        Ok(self
            .users
            .get(username)
            .cloned()
            .map_or(Identity::Guest, Identity::Authenticated))
    }
}
