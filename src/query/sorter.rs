//! Record ordering
//!
//! Sorts by (weekday rank, start time) ascending. Unknown or empty days
//! rank 99 and land last. Start times compare as raw strings, which is
//! chronological only because they are zero-padded 24-hour values.
//! The sort is stable.

use std::cmp::Ordering;

use super::weekday::day_rank;
use crate::extract::Record;

/// Total order used for display
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    day_rank(&a.day)
        .cmp(&day_rank(&b.day))
        .then_with(|| a.start_time.cmp(&b.start_time))
}

/// Sorts records in place, stable
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(compare_records);
}

/// Sorted copy of the input
pub fn sorted(mut records: Vec<Record>) -> Vec<Record> {
    sort_records(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, day: &str, start: &str) -> Record {
        Record {
            id: id.into(),
            day: day.into(),
            start_time: start.into(),
            ..Record::default()
        }
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_day_then_start() {
        let out = sorted(vec![
            record("fri", "Friday", "08:00"),
            record("mon-late", "Monday", "14:00:00"),
            record("wed", "Wednesday", "09:00"),
            record("mon-early", "Monday", "08:30:00"),
        ]);
        assert_eq!(ids(&out), vec!["mon-early", "mon-late", "wed", "fri"]);
    }

    #[test]
    fn test_unknown_and_blank_days_last() {
        let out = sorted(vec![
            record("blank", "", "07:00"),
            record("sat", "Saturday", "06:00"),
            record("tue", "Tuesday", "18:00"),
        ]);
        assert_eq!(ids(&out), vec!["tue", "sat", "blank"]);
    }

    #[test]
    fn test_sort_stable_on_equal_keys() {
        let out = sorted(vec![
            record("a", "Monday", "08:00"),
            record("b", "Monday", "08:00"),
            record("x", "Sunday", "10:00"),
            record("y", "", "10:00"),
            record("c", "Monday", "08:00"),
        ]);
        assert_eq!(ids(&out), vec!["a", "b", "c", "x", "y"]);
    }

    #[test]
    fn test_start_time_compares_lexicographically() {
        assert_eq!(
            compare_records(&record("a", "Monday", "09:00"), &record("b", "Monday", "10:00")),
            Ordering::Less
        );
        // Non-padded values are not chronological
        assert_eq!(
            compare_records(&record("a", "Monday", "9:00"), &record("b", "Monday", "10:00")),
            Ordering::Greater
        );
    }
}
