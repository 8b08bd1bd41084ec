//! Schema error types
//!
//! Error codes:
//! - TIMETABLE_SCHEMA_UNREADABLE (schema file missing, malformed or unsupported)
//! - TIMETABLE_VALIDATION_FAILED (document does not conform)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The schema itself could not be turned into a usable model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// File missing, unreadable, or not well-formed XML
    #[error("schema '{path}' is unreadable: {reason}")]
    Unreadable { path: String, reason: String },

    /// Well-formed XML, but not a schema this validator can apply
    #[error("schema '{path}' is unusable: {reason}")]
    Unsupported { path: String, reason: String },
}

impl SchemaError {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        SchemaError::Unsupported {
            path: crate::document::IN_MEMORY_PATH.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn with_path(self, source: &str) -> Self {
        match self {
            SchemaError::Unsupported { reason, .. } => SchemaError::Unsupported {
                path: source.to_string(),
                reason,
            },
            other => other,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        "TIMETABLE_SCHEMA_UNREADABLE"
    }

    /// Returns the schema path
    pub fn path(&self) -> &str {
        match self {
            SchemaError::Unreadable { path, .. } | SchemaError::Unsupported { path, .. } => path,
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// One way the document departs from the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Element path, e.g. `/timetable/course[2]/slot/day`
    pub path: String,
    /// What the schema asks for
    pub expected: String,
    /// What the document has
    pub actual: String,
}

impl Violation {
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_attribute(path: &str, attribute: &str) -> Self {
        Self::new(path, format!("attribute '{}'", attribute), "missing")
    }

    pub fn undeclared_attribute(path: &str, attribute: &str) -> Self {
        Self::new(path, "no undeclared attributes", format!("attribute '{}'", attribute))
    }

    pub fn unexpected_element(path: &str, element: &str) -> Self {
        Self::new(path, "no further child elements", format!("<{}>", element))
    }

    pub fn unexpected_text(path: &str) -> Self {
        Self::new(path, "element-only content", "text")
    }

    pub fn invalid_value(path: &str, expected: impl Into<String>, value: &str) -> Self {
        Self::new(path, expected, format!("'{}'", value))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.path, self.expected, self.actual)
    }
}
