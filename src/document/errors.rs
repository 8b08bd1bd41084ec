//! Document loading errors
//!
//! Error codes:
//! - TIMETABLE_SOURCE_UNREADABLE
//! - TIMETABLE_PARSE_ERROR

use thiserror::Error;

/// Pseudo path used for documents parsed from memory
pub const IN_MEMORY_PATH: &str = "<memory>";

/// Failure to turn a source into a document tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Source missing, not a file, or not readable
    #[error("source '{path}' is unreadable: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// Source read but not well-formed
    #[error("malformed document '{path}' at byte {position}: {reason}")]
    Parse {
        path: String,
        position: usize,
        reason: String,
    },
}

impl DocumentError {
    pub(crate) fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DocumentError::SourceUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(position: usize, reason: impl Into<String>) -> Self {
        DocumentError::Parse {
            path: IN_MEMORY_PATH.to_string(),
            position,
            reason: reason.into(),
        }
    }

    /// Attach the source path to an error raised while parsing from memory
    pub(crate) fn with_path(self, source: &str) -> Self {
        match self {
            DocumentError::Parse {
                position, reason, ..
            } => DocumentError::Parse {
                path: source.to_string(),
                position,
                reason,
            },
            other => other,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::SourceUnreadable { .. } => "TIMETABLE_SOURCE_UNREADABLE",
            DocumentError::Parse { .. } => "TIMETABLE_PARSE_ERROR",
        }
    }

    /// Returns the path of the offending source
    pub fn path(&self) -> &str {
        match self {
            DocumentError::SourceUnreadable { path, .. } | DocumentError::Parse { path, .. } => {
                path
            }
        }
    }
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DocumentError::unreadable("a.xml", "missing").code(),
            "TIMETABLE_SOURCE_UNREADABLE"
        );
        assert_eq!(DocumentError::parse(3, "bad").code(), "TIMETABLE_PARSE_ERROR");
    }

    #[test]
    fn test_with_path_only_touches_parse_errors() {
        let err = DocumentError::parse(7, "unclosed").with_path("data/t.xml");
        assert_eq!(err.path(), "data/t.xml");
        assert!(err.to_string().contains("byte 7"));

        let err = DocumentError::unreadable("a.xml", "missing").with_path("b.xml");
        assert_eq!(err.path(), "a.xml");
    }
}
