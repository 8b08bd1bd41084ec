//! Record filtering
//!
//! Exact string equality only: no substring match, no case folding.
//! All criteria must match (AND semantics); no criteria keeps everything.

use serde::{Deserialize, Serialize};

use crate::extract::Record;

/// Optional equality criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub day: Option<String>,
    pub subject: Option<String>,
}

impl RecordFilter {
    /// Builds a filter from raw query parameters: values are trimmed and
    /// empty strings count as absent.
    pub fn from_params(day: Option<&str>, subject: Option<&str>) -> Self {
        Self {
            day: normalize_param(day),
            subject: normalize_param(subject),
        }
    }

    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.day.is_none() && self.subject.is_none()
    }

    /// Checks one record against every criterion
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(day) = &self.day {
            if record.day != *day {
                return false;
            }
        }
        if let Some(subject) = &self.subject {
            if record.subject != *subject {
                return false;
            }
        }
        true
    }

    /// Keeps the matching records, preserving their order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn normalize_param(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Filters records by day and/or subject.
pub fn filter_records(records: Vec<Record>, day: Option<&str>, subject: Option<&str>) -> Vec<Record> {
    RecordFilter {
        day: day.map(str::to_string),
        subject: subject.map(str::to_string),
    }
    .apply(records)
}
