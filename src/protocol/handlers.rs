//! Command handlers
//!
//! Executes console commands against a client session.

use std::fmt::Display;

use log::{error, info, warn};

use crate::auth::{PasswordVerifier, UserLookup, hash_password};
use crate::client::ClientSession;
use crate::identity::Identity;
use crate::protocol::responses::{
    AUTH_FAILED, BAD_SEQUENCE, CLOSING, LOCAL_ERROR, LOGIN_SUCCESS, OK, PASSWORD_REQUIRED,
    UNKNOWN_COMMAND, format_response,
};
use crate::protocol::{Command, CommandResult, CommandStatus};

/// Dispatches a parsed command to its handler.
pub fn handle_command<L, V>(session: &mut ClientSession<L, V>, command: &Command) -> CommandResult
where
    L: UserLookup,
    L::Error: Display,
    V: PasswordVerifier,
{
    match command {
        Command::USER(username) => handle_cmd_user(session, username),
        Command::PASS(password) => handle_cmd_pass(session, password),
        Command::HASH(password) => handle_cmd_hash(session, password),
        Command::QUIT => handle_cmd_quit(session),
        Command::UNKNOWN => CommandResult {
            status: CommandStatus::Failure("Unknown command".into()),
            message: Some(format_response(UNKNOWN_COMMAND, "Unknown command")),
        },
    }
}

/// Handles the QUIT command: logs out and signals the session to close.
fn handle_cmd_quit<L, V>(session: &mut ClientSession<L, V>) -> CommandResult
where
    L: UserLookup,
    V: PasswordVerifier,
{
    session.logout();

    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(CLOSING, "Goodbye")),
    }
}

/// Handles the USER command: starts a new attempt with the given username.
///
/// Always asks for a password, whether or not the user exists.
fn handle_cmd_user<L, V>(session: &mut ClientSession<L, V>, username: &str) -> CommandResult
where
    L: UserLookup,
    V: PasswordVerifier,
{
    session.logout();
    session.authenticator_mut().set_username(username);
    session.set_user_given(true);

    CommandResult {
        status: CommandStatus::Success,
        message: Some(format_response(PASSWORD_REQUIRED, "Password required")),
    }
}

/// Handles the PASS command: authenticates the pending username.
fn handle_cmd_pass<L, V>(session: &mut ClientSession<L, V>, password: &str) -> CommandResult
where
    L: UserLookup,
    L::Error: Display,
    V: PasswordVerifier,
{
    if !session.is_user_given() {
        return CommandResult {
            status: CommandStatus::Failure("Password before username".into()),
            message: Some(format_response(BAD_SEQUENCE, "Login with USER first")),
        };
    }

    session.authenticator_mut().set_password(password);
    let outcome = session.authenticator().authenticate();

    // Every PASS ends the attempt; a retry starts again with USER.
    session.authenticator_mut().set_password("");
    session.set_user_given(false);

    match outcome {
        Ok(identity @ Identity::Authenticated(_)) => {
            info!("Login successful for {}", identity);
            session.set_identity(identity);
            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_response(LOGIN_SUCCESS, "Login successful")),
            }
        }
        Ok(Identity::Guest) => {
            warn!("Login incorrect for {}", session.authenticator().username());
            session.set_identity(Identity::Guest);
            CommandResult {
                status: CommandStatus::Failure("Login incorrect".into()),
                message: Some(format_response(AUTH_FAILED, "Login incorrect")),
            }
        }
        Err(e) => {
            error!("User lookup failed: {}", e);
            session.set_identity(Identity::Guest);
            CommandResult {
                status: CommandStatus::Failure(e.to_string()),
                message: Some(format_response(LOCAL_ERROR, "Local error in processing")),
            }
        }
    }
}

/// Handles the HASH command: prints a bcrypt hash for the config file.
fn handle_cmd_hash<L, V>(session: &mut ClientSession<L, V>, password: &str) -> CommandResult
where
    L: UserLookup,
    V: PasswordVerifier,
{
    match hash_password(password, session.bcrypt_cost()) {
        Ok(hash) => CommandResult {
            status: CommandStatus::Success,
            message: Some(format_response(OK, &hash)),
        },
        Err(e) => {
            error!("Hashing failed: {}", e);
            CommandResult {
                status: CommandStatus::Failure(e.to_string()),
                message: Some(format_response(LOCAL_ERROR, "Local error in processing")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;
    use crate::auth::{BcryptVerifier, CredentialAuthenticator, InMemoryUserLookup};
    use crate::protocol::parse_command;

    fn session() -> ClientSession<InMemoryUserLookup> {
        let mut store = InMemoryUserLookup::new();
        store
            .insert_password("bob", "password", MIN_BCRYPT_COST)
            .unwrap();
        ClientSession::new(CredentialAuthenticator::new(store), MIN_BCRYPT_COST)
    }

    fn run(session: &mut ClientSession<InMemoryUserLookup>, line: &str) -> String {
        handle_command(session, &parse_command(line))
            .message
            .unwrap_or_default()
    }

    #[test]
    fn test_login_success() {
        let mut session = session();
        assert_eq!(run(&mut session, "USER bob"), "331 Password required\r\n");
        assert_eq!(run(&mut session, "PASS password"), "230 Login successful\r\n");
        assert_eq!(session.identity().username(), Some("bob"));
        assert_eq!(session.authenticator().password(), "");
    }

    #[test]
    fn test_bad_password_and_unknown_user_get_same_reply() {
        let mut session = session();
        run(&mut session, "USER bob");
        let wrong = run(&mut session, "PASS badpassword");

        run(&mut session, "USER unknown");
        let unknown = run(&mut session, "PASS password");

        assert_eq!(wrong, "530 Login incorrect\r\n");
        assert_eq!(wrong, unknown);
        assert!(session.identity().is_guest());
    }

    #[test]
    fn test_unknown_user_still_asks_for_password() {
        let mut session = session();
        assert_eq!(run(&mut session, "USER nobody"), "331 Password required\r\n");
    }

    #[test]
    fn test_pass_requires_user() {
        let mut session = session();
        assert_eq!(run(&mut session, "PASS password"), "503 Login with USER first\r\n");

        run(&mut session, "USER bob");
        run(&mut session, "PASS badpassword");
        assert_eq!(run(&mut session, "PASS password"), "503 Login with USER first\r\n");
    }

    #[test]
    fn test_new_user_resets_identity() {
        let mut session = session();
        run(&mut session, "USER bob");
        run(&mut session, "PASS password");
        run(&mut session, "USER frank");
        assert!(session.identity().is_guest());
    }

    #[test]
    fn test_hash_command_output_verifies() {
        let mut session = session();
        let reply = run(&mut session, "HASH s3cret");
        let hash = reply.trim_end().strip_prefix("200 ").unwrap();
        assert!(BcryptVerifier.verify("s3cret", hash));
    }

    #[test]
    fn test_quit_closes() {
        let mut session = session();
        let result = handle_command(&mut session, &Command::QUIT);
        assert_eq!(result.status, CommandStatus::CloseConnection);
        assert_eq!(result.message.as_deref(), Some("221 Goodbye\r\n"));
    }

    #[test]
    fn test_unknown_command() {
        let mut session = session();
        assert_eq!(run(&mut session, "LIST"), "500 Unknown command\r\n");
    }
}
