//! Module `commands`
//!
//! Defines the login console commands, their status and results.

/// A command parsed from a console input line.
///
/// Commands that require arguments store them as `String` variants.
#[derive(PartialEq)]
pub enum Command {
    QUIT,
    USER(String), // Candidate username
    PASS(String), // Candidate password
    HASH(String), // Hash a password for the config file
    UNKNOWN,
}

// Password arguments must never reach the logs.
impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::QUIT => write!(f, "QUIT"),
            Command::USER(username) => write!(f, "USER({:?})", username),
            Command::PASS(_) => write!(f, "PASS(<redacted>)"),
            Command::HASH(_) => write!(f, "HASH(<redacted>)"),
            Command::UNKNOWN => write!(f, "UNKNOWN"),
        }
    }
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw input line into the `Command` enum.
///
/// Returns `UNKNOWN` if a known command is missing its argument.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim_start().trim_end_matches(['\r', '\n']);
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("");

    match cmd.as_str() {
        "QUIT" | "Q" => Command::QUIT,
        "USER" if !arg.trim().is_empty() => Command::USER(arg.trim().to_string()),
        // Passwords are taken verbatim, surrounding spaces included.
        "PASS" if !arg.is_empty() => Command::PASS(arg.to_string()),
        "HASH" if !arg.is_empty() => Command::HASH(arg.to_string()),
        _ => Command::UNKNOWN,
    }
}
