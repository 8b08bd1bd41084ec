//! Timetable pipeline
//!
//! Orchestrates loader, validator, extractor and the query engine, and
//! turns each failure into a terminal condition.

mod errors;
mod pipeline;

pub use errors::{TerminalCondition, TimetableError, TimetableResult};
pub use pipeline::Timetable;
