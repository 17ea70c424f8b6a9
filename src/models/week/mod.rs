// Week module
// ISO week identity, per-week block snapshots and derived day shading

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::block::TimeBlock;

/// Identifies one Monday-to-Sunday week by ISO year and ISO week number.
///
/// Rendered as `YYYY-Www` (for example `2025-W07`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    monday: NaiveDate,
}

impl WeekKey {
    /// Week containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - Duration::days(offset),
        }
    }

    /// Week from its ISO year and number, if that week exists
    pub fn new(iso_year: i32, iso_week: u32) -> Option<Self> {
        NaiveDate::from_isoywd_opt(iso_year, iso_week, Weekday::Mon).map(|monday| Self { monday })
    }

    pub fn iso_year(&self) -> i32 {
        self.monday.iso_week().year()
    }

    pub fn iso_week(&self) -> u32 {
        self.monday.iso_week().week()
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn sunday(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    /// The seven days of the week, Monday first
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.monday.iter_days().take(7)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday <= date && date <= self.sunday()
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.iso_year(), self.iso_week())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid week key `{0}`, expected YYYY-Www")]
pub struct ParseWeekKeyError(String);

impl FromStr for WeekKey {
    type Err = ParseWeekKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseWeekKeyError(s.to_string());
        let (year, week) = s.trim().split_once("-W").ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let week = week.parse::<u32>().map_err(|_| invalid())?;
        WeekKey::new(year, week).ok_or_else(invalid)
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Saved block set of one week
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSnapshot {
    pub blocks: Vec<TimeBlock>,
}

impl WeekSnapshot {
    pub fn new(blocks: Vec<TimeBlock>) -> Self {
        Self { blocks }
    }
}

/// Every cached week, as handed to the persistence layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekArchive {
    pub weeks: BTreeMap<WeekKey, WeekSnapshot>,
}

/// Whether a visible day gets rest shading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundDay {
    pub date: NaiveDate,
    pub covered: bool,
}

/// Emitted when the visible week changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekChange {
    pub from: WeekKey,
    pub to: WeekKey,
}
