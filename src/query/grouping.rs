//! Grouping into the teaching week
//!
//! Five buckets, Monday through Friday, always present and always in that
//! order. Bucket contents keep the order of the input.

use serde::{Deserialize, Serialize};

use super::weekday::Weekday;
use crate::extract::Record;

/// What happens to records whose day is not a teaching day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDayPolicy {
    /// Silently leave them out of the week
    #[default]
    Drop,
    /// Keep them in [`WeekSchedule::unscheduled`]
    Collect,
}

/// One weekday and its records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub day: Weekday,
    pub records: Vec<Record>,
}

/// Records grouped by weekday, Monday first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    days: Vec<DayBucket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unscheduled: Vec<Record>,
}

impl WeekSchedule {
    /// Week with five empty buckets
    pub fn empty() -> Self {
        Self {
            days: Weekday::ALL
                .into_iter()
                .map(|day| DayBucket {
                    day,
                    records: Vec::new(),
                })
                .collect(),
            unscheduled: Vec::new(),
        }
    }

    /// Buckets in Monday..Friday order
    pub fn days(&self) -> &[DayBucket] {
        &self.days
    }

    /// Records of one weekday
    pub fn records_for(&self, day: Weekday) -> &[Record] {
        &self.days[day.rank() as usize - 1].records
    }

    /// Records whose day is outside the week (only filled under `Collect`)
    pub fn unscheduled(&self) -> &[Record] {
        &self.unscheduled
    }

    /// Number of records placed in the week, unscheduled excluded
    pub fn scheduled_count(&self) -> usize {
        self.days.iter().map(|b| b.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled_count() == 0 && self.unscheduled.is_empty()
    }

    fn push(&mut self, day: Weekday, record: Record) {
        self.days[day.rank() as usize - 1].records.push(record);
    }
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self::empty()
    }
}

/// Groups records by weekday.
///
/// Records whose day is not exactly one of the five teaching days are
/// dropped or collected depending on `policy`.
pub fn group_by_day(records: Vec<Record>, policy: UnknownDayPolicy) -> WeekSchedule {
    let mut week = WeekSchedule::empty();
    for record in records {
        match Weekday::from_name(&record.day) {
            Some(day) => week.push(day, record),
            None => {
                if policy == UnknownDayPolicy::Collect {
                    week.unscheduled.push(record);
                }
            }
        }
    }
    week
}
