// Block module
// Work/rest time block model for the weekly work calendar

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The engine renders a single resource row; every block carries this tag.
pub const RESOURCE_ID: u32 = 1;

/// Opaque, stable identifier of a time block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Mint a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier for the residual half of a split block.
    ///
    /// The residual is named after the block it was carved from (`<id>-split`).
    /// If that name is already in use a numeric suffix is appended until
    /// `is_taken` reports a free one.
    pub fn split_residual(&self, is_taken: impl Fn(&BlockId) -> bool) -> BlockId {
        let base = format!("{}-split", self.0);
        let mut candidate = BlockId(base.clone());
        let mut counter = 2u32;
        while is_taken(&candidate) {
            candidate = BlockId(format!("{}-{}", base, counter));
            counter += 1;
        }
        candidate
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Independent overlap domain. Blocks in different lanes never conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Timed work blocks in the hour grid
    Time,
    /// Rest blocks, usually whole days in the all-day row
    Weekend,
}

impl Lane {
    /// Kind assigned to blocks created in this lane
    pub fn kind(self) -> BlockKind {
        match self {
            Lane::Time => BlockKind::Work,
            Lane::Weekend => BlockKind::Rest,
        }
    }

    /// Lane for a freshly selected span: midnight-to-midnight selections come
    /// from the all-day row and become rest blocks, everything else is work.
    pub fn for_span(start: NaiveDateTime, end: NaiveDateTime) -> Lane {
        if is_all_day_span(start, end) {
            Lane::Weekend
        } else {
            Lane::Time
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Time => "time",
            Lane::Weekend => "weekend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Work,
    Rest,
}

impl BlockKind {
    /// Default title shown on blocks of this kind
    pub fn title(self) -> &'static str {
        match self {
            BlockKind::Work => "Work time",
            BlockKind::Rest => "Rest day",
        }
    }
}

/// True when the instant sits exactly on a day boundary
pub fn is_midnight(instant: NaiveDateTime) -> bool {
    instant.time() == NaiveTime::MIN
}

/// True for the all-day encoding: both endpoints on `00:00`, end after start.
pub fn is_all_day_span(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start < end && is_midnight(start) && is_midnight(end)
}

/// First and last calendar day touched by a span.
///
/// A closing `00:00` belongs to the previous day, so `Mon 00:00 - Tue 00:00`
/// and `Mon 22:00 - Tue 00:00` both cover Monday only.
pub fn span_days(start: NaiveDateTime, end: NaiveDateTime) -> (NaiveDate, NaiveDate) {
    let last = if end > start && is_midnight(end) {
        (end - Duration::days(1)).date()
    } else {
        end.date()
    };
    (start.date(), last.max(start.date()))
}

/// A single work or rest interval in the weekly calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: BlockId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub lane: Lane,
    pub kind: BlockKind,
    pub resource_id: u32,
}

impl TimeBlock {
    /// Create a new block with a fresh id in the given lane
    ///
    /// # Arguments
    /// * `lane` - Overlap domain; also decides the block kind and title
    /// * `start` - Block start
    /// * `end` - Block end, strictly after `start`
    ///
    /// # Examples
    /// ```
    /// use workweek_scheduler::models::block::{BlockKind, Lane, TimeBlock};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    /// let block = TimeBlock::new(
    ///     Lane::Time,
    ///     day.and_hms_opt(9, 0, 0).unwrap(),
    ///     day.and_hms_opt(12, 0, 0).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(block.kind, BlockKind::Work);
    /// ```
    pub fn new(lane: Lane, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, String> {
        if end <= start {
            return Err("Block end time must be after start time".to_string());
        }

        let kind = lane.kind();
        Ok(Self {
            id: BlockId::generate(),
            title: kind.title().to_string(),
            start,
            end,
            lane,
            kind,
            resource_id: RESOURCE_ID,
        })
    }

    /// Replace the generated id (fixtures, imports)
    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = id.into();
        self
    }

    /// Same block (id, lane, kind, title) with new geometry
    pub fn with_span(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Validate the block's own invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.end <= self.start {
            return Err("Block end time must be after start time".to_string());
        }

        if self.crosses_midnight() {
            return Err("Timed blocks must start and end on the same day".to_string());
        }

        if self.title.trim().is_empty() {
            return Err("Block title cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn is_all_day(&self) -> bool {
        is_all_day_span(self.start, self.end)
    }

    /// A timed (not all-day) block whose end falls on a later date
    pub fn crosses_midnight(&self) -> bool {
        !self.is_all_day() && self.start.date() != self.end.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// First and last calendar day the block covers
    pub fn days(&self) -> (NaiveDate, NaiveDate) {
        span_days(self.start, self.end)
    }

    pub fn covers_day(&self, date: NaiveDate) -> bool {
        let (first, last) = self.days();
        first <= date && date <= last
    }

    /// True when both blocks touch at least one common calendar day
    pub fn shares_day_with(&self, other: &TimeBlock) -> bool {
        let (first, last) = self.days();
        let (other_first, other_last) = other.days();
        first <= other_last && other_first <= last
    }

    /// Same block moved by a fixed offset
    pub fn shifted(&self, offset: Duration) -> Self {
        self.with_span(self.start + offset, self.end + offset)
    }
}
