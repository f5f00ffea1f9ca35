use log::{debug, info, warn};
use std::fmt::Display;
use std::io::{BufRead, Read, Write};

use crate::auth::{PasswordVerifier, UserLookup};
use crate::client::ClientSession;
use crate::error::AuthResult;
use crate::protocol::responses::{UNKNOWN_COMMAND, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};

const MAX_COMMAND_LENGTH: usize = 512;

/// Runs a login console session until QUIT or end of input.
///
/// - Reads one command per line from `reader`, never buffering more than
///   `MAX_COMMAND_LENGTH + 1` bytes of a line.
/// - Dispatches commands using `handle_command`.
/// - Writes each reply to `writer`.
pub fn handle_client<L, V, R, W>(
    session: &mut ClientSession<L, V>,
    mut reader: R,
    mut writer: W,
) -> AuthResult<()>
where
    L: UserLookup,
    L::Error: Display,
    V: PasswordVerifier,
    R: BufRead,
    W: Write,
{
    let mut line = Vec::with_capacity(MAX_COMMAND_LENGTH + 1);

    loop {
        line.clear();
        let read = reader
            .by_ref()
            .take(MAX_COMMAND_LENGTH as u64 + 1)
            .read_until(b'\n', &mut line)?;
        if read == 0 {
            info!("Console input closed");
            break;
        }

        if line.len() > MAX_COMMAND_LENGTH {
            if !line.ends_with(b"\n") {
                discard_line(&mut reader)?;
            }
            send(&mut writer, &format_response(UNKNOWN_COMMAND, "Command too long"))?;
            continue;
        }

        let Ok(text) = std::str::from_utf8(&line) else {
            warn!("Discarding command that is not valid UTF-8");
            send(&mut writer, &format_response(UNKNOWN_COMMAND, "Command is not valid UTF-8"))?;
            continue;
        };

        let command = parse_command(text);
        debug!("Received: {:?}", command);

        let result = handle_command(session, &command);
        if let Some(msg) = &result.message {
            send(&mut writer, msg)?;
        }

        if result.status == CommandStatus::CloseConnection {
            info!("Console session ended by QUIT");
            break;
        }
    }

    Ok(())
}

/// Skips the rest of the current line in bounded chunks.
fn discard_line<R: BufRead>(reader: &mut R) -> AuthResult<()> {
    let mut chunk = Vec::with_capacity(MAX_COMMAND_LENGTH);
    loop {
        chunk.clear();
        let read = reader
            .by_ref()
            .take(MAX_COMMAND_LENGTH as u64)
            .read_until(b'\n', &mut chunk)?;
        if read == 0 || chunk.ends_with(b"\n") {
            return Ok(());
        }
    }
}

fn send<W: Write>(writer: &mut W, msg: &str) -> AuthResult<()> {
    writer.write_all(msg.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialAuthenticator, InMemoryUserLookup};
    use crate::config::MIN_BCRYPT_COST;
    use std::io::{self, BufReader, Cursor};

    fn session() -> ClientSession<InMemoryUserLookup> {
        let mut store = InMemoryUserLookup::new();
        store
            .insert_password("bob", "password", MIN_BCRYPT_COST)
            .unwrap();
        ClientSession::new(CredentialAuthenticator::new(store), MIN_BCRYPT_COST)
    }

    fn run<R: BufRead>(reader: R) -> String {
        let mut output = Vec::new();
        handle_client(&mut session(), reader, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_invalid_utf8_line_is_rejected_and_session_continues() {
        let input: &[u8] = b"USER \xff\xfe\r\nUSER bob\r\nQUIT\r\n";
        assert_eq!(
            run(Cursor::new(input)),
            "500 Command is not valid UTF-8\r\n331 Password required\r\n221 Goodbye\r\n"
        );
    }

    #[test]
    fn test_oversized_line_is_skipped_in_chunks() {
        let flood = io::repeat(b'x').take(100_000);
        let reader = BufReader::new(flood.chain(Cursor::new(&b"\nUSER bob\r\nQUIT\r\n"[..])));
        assert_eq!(
            run(reader),
            "500 Command too long\r\n331 Password required\r\n221 Goodbye\r\n"
        );
    }

    #[test]
    fn test_oversized_line_without_newline_ends_at_eof() {
        let reader = BufReader::new(io::repeat(b'x').take(10_000));
        assert_eq!(run(reader), "500 Command too long\r\n");
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let mut input = format!("USER {}", "b".repeat(MAX_COMMAND_LENGTH - 6));
        input.push('\n');
        assert_eq!(input.len(), MAX_COMMAND_LENGTH);
        assert_eq!(run(Cursor::new(input)), "331 Password required\r\n");
    }
}
