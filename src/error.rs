//! The error type shared by every fallible operation in the crate.
//!
//! `OutbreakError` is a plain enum rather than a derived error so that the conversions from the
//! I/O, JSON and CSV layers stay explicit. Configuration problems are reported through
//! [`OutbreakError::InvalidParameter`], which names the offending field the way it is spelled
//! in a configuration file.

use std::fmt::{self, Display};
use std::io;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum OutbreakError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    LoggingError(String),
    OutbreakError(String),
}

impl OutbreakError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        OutbreakError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for OutbreakError {
    fn from(error: io::Error) -> Self {
        OutbreakError::IoError(error)
    }
}

impl From<serde_json::Error> for OutbreakError {
    fn from(error: serde_json::Error) -> Self {
        OutbreakError::JsonError(error)
    }
}

impl From<csv::Error> for OutbreakError {
    fn from(error: csv::Error) -> Self {
        OutbreakError::CsvError(error)
    }
}

impl From<String> for OutbreakError {
    fn from(error: String) -> Self {
        OutbreakError::OutbreakError(error)
    }
}

impl From<&str> for OutbreakError {
    fn from(error: &str) -> Self {
        OutbreakError::OutbreakError(error.to_string())
    }
}

impl std::error::Error for OutbreakError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutbreakError::IoError(error) => Some(error),
            OutbreakError::JsonError(error) => Some(error),
            OutbreakError::CsvError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for OutbreakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutbreakError::IoError(error) => write!(f, "I/O error: {error}"),
            OutbreakError::JsonError(error) => write!(f, "JSON error: {error}"),
            OutbreakError::CsvError(error) => write!(f, "CSV error: {error}"),
            OutbreakError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter {name}: {reason}")
            }
            OutbreakError::LoggingError(message) => write!(f, "logging error: {message}"),
            OutbreakError::OutbreakError(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_parameter_display_names_field() {
        let error = OutbreakError::invalid("MORTALITY_RATE", "must lie in [0, 1], got 1.5");
        assert_eq!(
            error.to_string(),
            "invalid parameter MORTALITY_RATE: must lie in [0, 1], got 1.5"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error: OutbreakError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(error, OutbreakError::IoError(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_from_str() {
        let error: OutbreakError = "run aborted".into();
        assert_eq!(error.to_string(), "run aborted");
    }
}
