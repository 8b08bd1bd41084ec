//! Pipeline error types
//!
//! Error codes:
//! - TIMETABLE_SOURCE_UNREADABLE (LoadFailed)
//! - TIMETABLE_PARSE_ERROR (LoadFailed)
//! - TIMETABLE_SCHEMA_UNREADABLE (ValidationFailed)
//! - TIMETABLE_VALIDATION_FAILED (ValidationFailed)
//! - TIMETABLE_CONFIG_ERROR (Config)
//!
//! Every error is terminal: no retries, nothing rendered afterwards.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::schema::{SchemaError, Violation};

/// How a failed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCondition {
    /// The source document could not be read or parsed
    LoadFailed,
    /// The schema was unusable or the document did not conform
    ValidationFailed,
    /// The configuration was unusable
    Config,
}

impl TerminalCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalCondition::LoadFailed => "LOAD_FAILED",
            TerminalCondition::ValidationFailed => "VALIDATION_FAILED",
            TerminalCondition::Config => "CONFIG",
        }
    }
}

impl fmt::Display for TerminalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of a pipeline run
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("timetable source '{path}' is unreadable: {reason}")]
    SourceUnreadable { path: String, reason: String },

    #[error("timetable source '{path}' is malformed at byte {position}: {reason}")]
    ParseError {
        path: String,
        position: usize,
        reason: String,
    },

    #[error("schema '{path}' is unusable: {reason}")]
    SchemaUnreadable { path: String, reason: String },

    #[error("timetable does not conform to its schema ({} violation(s))", .violations.len())]
    ValidationFailed { violations: Vec<Violation> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TimetableError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TimetableError::SourceUnreadable { .. } => "TIMETABLE_SOURCE_UNREADABLE",
            TimetableError::ParseError { .. } => "TIMETABLE_PARSE_ERROR",
            TimetableError::SchemaUnreadable { .. } => "TIMETABLE_SCHEMA_UNREADABLE",
            TimetableError::ValidationFailed { .. } => "TIMETABLE_VALIDATION_FAILED",
            TimetableError::Config(_) => "TIMETABLE_CONFIG_ERROR",
        }
    }

    /// Returns the terminal condition this error ends the run with
    pub fn terminal(&self) -> TerminalCondition {
        match self {
            TimetableError::SourceUnreadable { .. } | TimetableError::ParseError { .. } => {
                TerminalCondition::LoadFailed
            }
            TimetableError::SchemaUnreadable { .. } | TimetableError::ValidationFailed { .. } => {
                TerminalCondition::ValidationFailed
            }
            TimetableError::Config(_) => TerminalCondition::Config,
        }
    }

    /// Violations carried by a validation failure, empty otherwise
    pub fn violations(&self) -> &[Violation] {
        match self {
            TimetableError::ValidationFailed { violations } => violations,
            _ => &[],
        }
    }
}

impl From<DocumentError> for TimetableError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::SourceUnreadable { path, reason } => {
                TimetableError::SourceUnreadable { path, reason }
            }
            DocumentError::Parse {
                path,
                position,
                reason,
            } => TimetableError::ParseError {
                path,
                position,
                reason,
            },
        }
    }
}

impl From<SchemaError> for TimetableError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Unreadable { path, reason } | SchemaError::Unsupported { path, reason } => {
                TimetableError::SchemaUnreadable { path, reason }
            }
        }
    }
}

/// Result type for pipeline operations
pub type TimetableResult<T> = Result<T, TimetableError>;
