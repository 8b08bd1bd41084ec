//! CLI-specific error types
//!
//! Every CLI error ends the process with exit status 1.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::timetable::{TerminalCondition, TimetableError};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, malformed or invalid
    ConfigError,
    /// stdout could not be written
    IoError,
    /// Source document missing or unreadable
    SourceUnreadable,
    /// Source document not well-formed
    ParseError,
    /// Schema missing, malformed or unsupported
    SchemaUnreadable,
    /// Document does not conform to the schema
    ValidationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TIMETABLE_CONFIG_ERROR",
            Self::IoError => "TIMETABLE_CLI_IO_ERROR",
            Self::SourceUnreadable => "TIMETABLE_SOURCE_UNREADABLE",
            Self::ParseError => "TIMETABLE_PARSE_ERROR",
            Self::SchemaUnreadable => "TIMETABLE_SCHEMA_UNREADABLE",
            Self::ValidationFailed => "TIMETABLE_VALIDATION_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<TimetableError> for CliError {
    fn from(e: TimetableError) -> Self {
        let code = match (&e, e.terminal()) {
            (_, TerminalCondition::Config) => CliErrorCode::ConfigError,
            (TimetableError::SourceUnreadable { .. }, _) => CliErrorCode::SourceUnreadable,
            (TimetableError::ParseError { .. }, _) => CliErrorCode::ParseError,
            (TimetableError::SchemaUnreadable { .. }, _) => CliErrorCode::SchemaUnreadable,
            _ => CliErrorCode::ValidationFailed,
        };
        Self::new(code, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_pipeline_errors() {
        let err: CliError = TimetableError::ParseError {
            path: "week.xml".into(),
            position: 12,
            reason: "unclosed tag".into(),
        }
        .into();
        assert_eq!(err.code(), CliErrorCode::ParseError);
        assert_eq!(err.code_str(), "TIMETABLE_PARSE_ERROR");
        assert!(err.message().contains("week.xml"));

        let err: CliError = TimetableError::ValidationFailed { violations: vec![] }.into();
        assert_eq!(err.code_str(), "TIMETABLE_VALIDATION_FAILED");

        let err: CliError = TimetableError::Config(ConfigError::Invalid("x".into())).into();
        assert_eq!(err.code_str(), "TIMETABLE_CONFIG_ERROR");
    }

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("missing file");
        assert_eq!(err.to_string(), "TIMETABLE_CONFIG_ERROR: missing file");
    }
}
