//! timetable - schedule loading, schema validation and weekly display
//!
//! Loads a course schedule XML document, gates it on an XSD schema,
//! extracts one record per course and filters, sorts and groups the
//! records into a Monday..Friday week.

pub mod cli;
pub mod config;
pub mod document;
pub mod extract;
pub mod observability;
pub mod query;
pub mod schema;
pub mod timetable;

pub use config::Config;
pub use query::{Query, WeekSchedule};
pub use timetable::{TerminalCondition, Timetable, TimetableError, TimetableResult};
