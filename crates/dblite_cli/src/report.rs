//! Error reporting.
//!
//! Renders errors as `[ error ] <message>`, highlighting identifiers in
//! yellow, database paths in green and pins in magenta.

use colored::Colorize;
use dblite_core::{CoreError, Pin};
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Database error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Entry value was not valid JSON.
    #[error("invalid JSON value: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage error outside a store operation.
    #[error(transparent)]
    Storage(#[from] dblite_storage::StorageError),
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Renders an error for the terminal.
pub fn render(err: &CliError) -> String {
    let message = match err {
        CliError::Core(err) => describe(err),
        other => other.to_string(),
    };
    format!("[{}] {message}", " error ".red())
}

fn describe(err: &CoreError) -> String {
    match err {
        CoreError::IdentifierNotFound { identifier } => format!(
            "identifier <{}> not found in this field",
            identifier.to_string().yellow()
        ),
        CoreError::FieldNotFound { name, path } => format!(
            "field <{}> not found in database {}",
            name.yellow(),
            quoted(path).green()
        ),
        CoreError::DatabaseNotFound { path } => {
            format!("database {} not found", quoted(path).green())
        }
        CoreError::PinMismatch { pin } => format!(
            "pin ( {} ) does not match the database",
            Pin::describe(pin).magenta()
        ),
        other => other.to_string(),
    }
}

fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plain(err: CoreError) -> String {
        colored::control::set_override(false);
        render(&CliError::from(err))
    }

    #[test]
    fn identifier_message() {
        assert_eq!(
            plain(CoreError::identifier_not_found(7)),
            "[ error ] identifier <7> not found in this field"
        );
    }

    #[test]
    fn field_message() {
        assert_eq!(
            plain(CoreError::field_not_found("users", "t.db")),
            "[ error ] field <users> not found in database \"t.db\""
        );
    }

    #[test]
    fn database_message() {
        assert_eq!(
            plain(CoreError::DatabaseNotFound {
                path: PathBuf::from("missing.dbl")
            }),
            "[ error ] database \"missing.dbl\" not found"
        );
    }

    #[test]
    fn pin_message() {
        assert_eq!(
            plain(CoreError::PinMismatch {
                pin: Some(Pin::new(9999))
            }),
            "[ error ] pin ( 9999 ) does not match the database"
        );
    }

    #[test]
    fn other_errors_use_display() {
        let rendered = plain(CoreError::invalid_format("bad magic"));
        assert_eq!(rendered, "[ error ] invalid database format: bad magic");
    }
}
