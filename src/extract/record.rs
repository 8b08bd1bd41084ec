//! Course record

use serde::{Deserialize, Serialize};

/// One scheduled session, as read from the document.
///
/// Every field is plain text; a field missing from the source is the
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub subject: String,
    pub instructor_family_name: String,
    pub instructor_given_name: String,
    pub day: String,
    /// `HH:MM` or `HH:MM:SS`, zero-padded 24-hour clock
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub session_type: String,
}

impl Record {
    /// Given name then family name, without stray spaces when one is missing
    pub fn instructor_display_name(&self) -> String {
        format!("{} {}", self.instructor_given_name, self.instructor_family_name)
            .trim()
            .to_string()
    }
}
