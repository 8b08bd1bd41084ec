//! Observable timetable events
//!
//! Events are explicit and typed so log consumers can match on stable names.

use std::fmt;

/// Observable events emitted by the load / validate / query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Document
    /// Source document parsed
    DocumentLoaded,
    /// Source document could not be read or parsed
    DocumentRejected,

    // Schema
    /// Schema file compiled
    SchemaLoaded,
    /// Document conforms to the schema
    SchemaValidated,
    /// Schema file unusable or document not conformant
    ValidationFailed,

    // Records
    /// Records extracted from the tree
    RecordsExtracted,
    /// Records with a day outside Monday..Friday left out of the week
    UnknownDaysDropped,

    // Query
    /// Filtered, sorted and grouped week produced
    QueryComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DocumentLoaded => "DOCUMENT_LOADED",
            Event::DocumentRejected => "DOCUMENT_REJECTED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaValidated => "SCHEMA_VALIDATED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::RecordsExtracted => "RECORDS_EXTRACTED",
            Event::UnknownDaysDropped => "UNKNOWN_DAYS_DROPPED",
            Event::QueryComplete => "QUERY_COMPLETE",
        }
    }

    /// Returns true if this event ends the current invocation
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::DocumentRejected | Event::ValidationFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
