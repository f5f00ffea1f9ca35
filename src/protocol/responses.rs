//! Console response handling
//!
//! Defines FTP-style reply codes and formatting.

/// Reply codes used by the login console
pub const OK: u16 = 200;
pub const CLOSING: u16 = 221;
pub const LOGIN_SUCCESS: u16 = 230;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const BAD_SEQUENCE: u16 = 503;
pub const LOCAL_ERROR: u16 = 451;
pub const AUTH_FAILED: u16 = 530;

/// Format a reply line
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_response() {
        assert_eq!(format_response(AUTH_FAILED, "Login incorrect"), "530 Login incorrect\r\n");
    }
}
