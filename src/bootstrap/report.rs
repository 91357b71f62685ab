//! Operator-facing bootstrap output.

use std::io::{self, Write};

use crate::bootstrap::connection::{ConnectionError, Database};

/// Printed once when the connection is established.
pub const SUCCESS_MESSAGE: &str = "Success: a proper connection to MySQL was made";

/// Safe to show to any user; carries no infrastructure detail.
pub const USER_MESSAGE: &str = "Something went wrong";

/// Write the confirmation line for an open connection.
pub fn confirm<W: Write>(db: &Database, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} ({})", SUCCESS_MESSAGE, db.label())
}

/// Log a failed attempt and write the raw diagnostic followed by the generic message.
pub fn report_failure<W: Write>(err: &ConnectionError, out: &mut W) -> io::Result<()> {
    tracing::error!(error = %err, debug = ?err, "Database bootstrap failed");
    writeln!(out, "{}", err)?;
    writeln!(out, "{}", USER_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::ENV_PASSWORD;

    #[test]
    fn test_failure_report_has_diagnostic_then_generic_message() {
        let err = ConnectionError::MissingEnv(ENV_PASSWORD);
        let mut out = Vec::new();
        report_failure(&err, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["environment variable MYSQL_password is not set", USER_MESSAGE]);
    }
}
