pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod protocol;

pub use auth::{CredentialAuthenticator, InMemoryUserLookup, UserLookup};
pub use error::{AuthError, AuthResult};
pub use identity::{AuthenticatedUser, Identity};
