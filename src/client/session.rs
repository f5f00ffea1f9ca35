//! Console session management
//!
//! Tracks the state of one login conversation.

use crate::auth::{BcryptVerifier, CredentialAuthenticator, PasswordVerifier, UserLookup};
use crate::identity::Identity;

/// State of one console login conversation
pub struct ClientSession<L, V = BcryptVerifier> {
    authenticator: CredentialAuthenticator<L, V>,
    user_given: bool,
    identity: Identity,
    bcrypt_cost: u32,
}

impl<L: UserLookup, V: PasswordVerifier> ClientSession<L, V> {
    pub fn new(authenticator: CredentialAuthenticator<L, V>, bcrypt_cost: u32) -> Self {
        Self {
            authenticator,
            user_given: false,
            identity: Identity::Guest,
            bcrypt_cost,
        }
    }

    pub fn authenticator(&self) -> &CredentialAuthenticator<L, V> {
        &self.authenticator
    }

    pub fn authenticator_mut(&mut self) -> &mut CredentialAuthenticator<L, V> {
        &mut self.authenticator
    }

    pub fn is_user_given(&self) -> bool {
        self.user_given
    }

    pub fn set_user_given(&mut self, given: bool) {
        self.user_given = given;
    }

    /// Identity established by the last login, `Guest` until one succeeds
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Drop candidate credentials and the established identity
    pub fn logout(&mut self) {
        self.authenticator.clear();
        self.user_given = false;
        self.identity = Identity::Guest;
    }
}
