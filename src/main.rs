//! credential-auth - Login console
//!
//! Reads USER/PASS lines from stdin and checks them against the configured users.

use log::{error, info};
use std::io;
use std::process::ExitCode;

use credential_auth::client::{ClientSession, handle_client};
use credential_auth::config::AuthConfig;
use credential_auth::{AuthResult, CredentialAuthenticator, InMemoryUserLookup};

fn run() -> AuthResult<()> {
    let config = AuthConfig::load()?;
    let store = InMemoryUserLookup::from_config(&config)?;
    info!("Loaded {} user(s)", store.len());

    let mut session = ClientSession::new(CredentialAuthenticator::new(store), config.bcrypt_cost);

    let stdin = io::stdin();
    let stdout = io::stdout();
    handle_client(&mut session, stdin.lock(), stdout.lock())
}

fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching login console...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
