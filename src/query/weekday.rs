//! The fixed teaching week

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rank given to any day outside the teaching week
pub const UNKNOWN_DAY_RANK: u8 = 99;

/// Teaching days, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days, Monday first
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Name as written in the document
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }

    /// 1 for Monday through 5 for Friday
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort rank of a raw day value: 1..=5 for teaching days, 99 otherwise
pub fn day_rank(day: &str) -> u8 {
    Weekday::from_name(day).map_or(UNKNOWN_DAY_RANK, |d| d.rank())
}
