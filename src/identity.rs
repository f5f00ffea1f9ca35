//! Identity types
//!
//! The outcome of an authentication attempt: either an authenticated user
//! record or the guest identity.

use std::fmt;

/// A user record resolved by a [`UserLookup`](crate::auth::UserLookup).
///
/// The stored password hash can only be read inside the crate, by the
/// comparison step of the authenticator.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
    password_hash: String,
}

impl AuthenticatedUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Result of resolving or authenticating a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Authenticated(AuthenticatedUser),
    /// Not authenticated. Returned for unknown users and failed passwords alike.
    Guest,
}

impl Identity {
    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_guest()
    }

    /// Username of an authenticated identity, `None` for guests.
    pub fn username(&self) -> Option<&str> {
        match self {
            Identity::Authenticated(user) => Some(user.username()),
            Identity::Guest => None,
        }
    }
}

impl From<AuthenticatedUser> for Identity {
    fn from(user: AuthenticatedUser) -> Self {
        Identity::Authenticated(user)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Authenticated(user) => write!(f, "{}", user.username()),
            Identity::Guest => write!(f, "guest"),
        }
    }
}
