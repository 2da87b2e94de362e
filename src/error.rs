//! Error types for testprogress

use std::io;
use thiserror::Error;

/// Result type alias for testprogress operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for testprogress
///
/// Test outcomes (failures, errors, skips...) are never represented here: they
/// are domain events recorded by the reporter. These variants cover the
/// reporter's own failures only.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The producer named an outcome kind the reporter does not know.
    #[error("Unknown test outcome: {0}")]
    UnknownOutcome(String),

    /// The producer broke its event ordering contract.
    #[error("Event ordering violated: {0}")]
    Contract(String),

    /// Failed to parse a line of the event stream.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid JSON in the event stream.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The progress bar template could not be built.
    #[error("Progress bar template error: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownOutcome("exploded".to_string());
        assert_eq!(err.to_string(), "Unknown test outcome: exploded");
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::Parse {
            line: 7,
            message: "missing field `name`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error on line 7: missing field `name`"
        );
    }

    #[test]
    fn test_error_from_string() {
        let err: Error = "custom error".into();
        assert_eq!(err.to_string(), "custom error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
