//! Plain-text rendering of the week
//!
//! One heading per weekday, one line per course:
//!
//! ```text
//! Monday
//!   08:00 – 09:30  Networks  Lecture  Alice Durand  B204
//! Tuesday
//!   (no courses)
//! ```

use std::fmt::Write;

use crate::extract::Record;
use crate::query::{time_range, WeekSchedule};
use crate::schema::Violation;

const EMPTY_DAY: &str = "  (no courses)";

/// Renders every weekday, then any unscheduled records.
pub fn render_week(week: &WeekSchedule) -> String {
    let mut out = String::new();
    for bucket in week.days() {
        let _ = writeln!(out, "{}", bucket.day);
        if bucket.records.is_empty() {
            let _ = writeln!(out, "{}", EMPTY_DAY);
        }
        for record in &bucket.records {
            let _ = writeln!(out, "  {}", render_record(record));
        }
    }
    if !week.unscheduled().is_empty() {
        let _ = writeln!(out, "Unscheduled");
        for record in week.unscheduled() {
            let day = if record.day.is_empty() { "?" } else { record.day.as_str() };
            let _ = writeln!(out, "  [{}] {}", day, render_record(record));
        }
    }
    out
}

/// One course line; empty fields are left out.
pub fn render_record(record: &Record) -> String {
    let instructor = record.instructor_display_name();
    let times = if record.start_time.is_empty() && record.end_time.is_empty() {
        String::new()
    } else {
        time_range(&record.start_time, &record.end_time)
    };

    [
        times.as_str(),
        record.subject.as_str(),
        record.session_type.as_str(),
        instructor.as_str(),
        record.room.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<&str>>()
    .join("  ")
}

/// One line per violation.
pub fn render_violations(violations: &[Violation]) -> String {
    let mut out = String::new();
    for violation in violations {
        let _ = writeln!(out, "{}", violation);
    }
    out
}
