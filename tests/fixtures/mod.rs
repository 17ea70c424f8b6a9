// Test fixtures - reusable test data
// Provides a fixed week and block builders shared by the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday Mar 3, 2025 (ISO week 2025-W10)
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    /// `hour:minute` on the given weekday offset from Monday
    pub fn at(day_offset: i64, hour: u32, minute: u32) -> NaiveDateTime {
        (monday() + chrono::Duration::days(day_offset))
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// `hour:minute` on the fixture Monday
    pub fn mon(hour: u32, minute: u32) -> NaiveDateTime {
        at(0, hour, minute)
    }

    /// Midnight opening the given weekday offset
    pub fn midnight(day_offset: i64) -> NaiveDateTime {
        at(day_offset, 0, 0)
    }
}

/// Selection helpers
pub mod selections {
    use super::*;
    use workweek_scheduler::models::block::Lane;
    use workweek_scheduler::services::session::SlotSelection;

    /// Work selection on the fixture Monday
    pub fn work(from: (u32, u32), to: (u32, u32)) -> SlotSelection {
        SlotSelection {
            start: dates::mon(from.0, from.1),
            end: dates::mon(to.0, to.1),
            lane: Lane::Time,
        }
    }

    /// Whole-day rest selection covering `days` days from the given offset
    pub fn rest_days(day_offset: i64, days: i64) -> SlotSelection {
        SlotSelection::new(dates::midnight(day_offset), dates::midnight(day_offset + days))
    }
}

/// Session helpers
pub mod sessions {
    use super::*;
    use chrono::Timelike;
    use workweek_scheduler::models::settings::EngineSettings;
    use workweek_scheduler::services::notification::{AlertQueue, NotificationSink};
    use workweek_scheduler::services::session::EditorSession;
    use workweek_scheduler::services::week_store::{InMemoryWeekStore, WeekStore};

    pub fn fresh() -> EditorSession<InMemoryWeekStore, AlertQueue> {
        EditorSession::in_memory(EngineSettings::default(), dates::monday()).unwrap()
    }

    /// `(start, end)` of every live block as `(hour, minute)` pairs
    pub fn spans<S: WeekStore, N: NotificationSink>(
        session: &EditorSession<S, N>,
    ) -> Vec<((u32, u32), (u32, u32))> {
        session
            .blocks()
            .iter()
            .map(|block| {
                (
                    (block.start.hour(), block.start.minute()),
                    (block.end.hour(), block.end.minute()),
                )
            })
            .collect()
    }
}
