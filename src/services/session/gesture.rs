use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::block::{BlockId, Lane};

/// Click-drag selection of an empty slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub lane: Lane,
}

impl SlotSelection {
    /// Selection whose lane follows from the span: midnight-to-midnight
    /// selections come from the all-day row.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            lane: Lane::for_span(start, end),
        }
    }
}

/// Drag of an existing block to a new position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveGesture {
    pub block_id: BlockId,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
    /// Released over the all-day row
    #[serde(default)]
    pub dropped_on_all_day: bool,
}

/// Edge drag that changes a block's start or end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeGesture {
    pub block_id: BlockId,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}
