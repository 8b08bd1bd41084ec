//! Filter, sort and group engine
//!
//! Pure functions over extracted records. Nothing here touches the
//! document or the filesystem.

mod filter;
mod grouping;
mod sorter;
mod time;
mod weekday;

pub use filter::{filter_records, RecordFilter};
pub use grouping::{group_by_day, DayBucket, UnknownDayPolicy, WeekSchedule};
pub use sorter::{compare_records, sort_records, sorted};
pub use time::{format_time, time_range, RANGE_SEPARATOR};
pub use weekday::{day_rank, Weekday, UNKNOWN_DAY_RANK};

use serde::{Deserialize, Serialize};

use crate::extract::Record;

/// A display request: which records to show and what to do with
/// records outside the teaching week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub filter: RecordFilter,
    /// Overrides the configured policy when set
    #[serde(default)]
    pub unknown_days: Option<UnknownDayPolicy>,
}

impl Query {
    /// Query from raw `day` / `subject` parameters
    pub fn from_params(day: Option<&str>, subject: Option<&str>) -> Self {
        Self {
            filter: RecordFilter::from_params(day, subject),
            unknown_days: None,
        }
    }

    pub fn with_unknown_days(mut self, policy: UnknownDayPolicy) -> Self {
        self.unknown_days = Some(policy);
        self
    }

    /// Filter, then sort, then group.
    pub fn apply(&self, records: Vec<Record>, default_policy: UnknownDayPolicy) -> WeekSchedule {
        let policy = self.unknown_days.unwrap_or(default_policy);
        let records = sorted(self.filter.apply(records));
        group_by_day(records, policy)
    }
}
