// Date utility functions
// Grid snapping and week/month helpers for the work calendar

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// Round an instant to the nearest multiple of `grid_minutes` past midnight.
///
/// Exact ties round up, so with a 15 minute grid `09:07:30` becomes `09:15`.
/// Sub-millisecond precision is discarded. Snapping late in the evening may
/// land on the next day's `00:00`.
pub fn snap_to_grid(instant: NaiveDateTime, grid_minutes: u32) -> NaiveDateTime {
    let grid_ms = i64::from(grid_minutes.max(1)) * 60_000;
    let midnight = start_of_day(instant);
    let offset_ms = (instant - midnight).num_milliseconds();
    let remainder = offset_ms % grid_ms;
    let floor = midnight + Duration::milliseconds(offset_ms - remainder);

    if remainder * 2 >= grid_ms {
        floor + Duration::milliseconds(grid_ms)
    } else {
        floor
    }
}

/// Monday-to-Sunday span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Weeks listed under a month in the navigation sidebar.
///
/// A week belongs to the month its Monday falls in; the last week may run
/// into the following month. Returns an empty list for an invalid month.
pub fn weeks_in_month(year: i32, month: u32) -> Vec<WeekSpan> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let days_to_monday = (7 - first.weekday().num_days_from_monday()) % 7;
    let first_monday = first + Duration::days(i64::from(days_to_monday));

    first_monday
        .iter_weeks()
        .take_while(|monday| monday.month() == month && monday.year() == year)
        .map(|monday| WeekSpan {
            start: monday,
            end: monday + Duration::days(6),
        })
        .collect()
}

/// 1-based position of the week holding `date` within its month's weeks
pub fn week_of_month(date: NaiveDate) -> Option<usize> {
    weeks_in_month(date.year(), date.month())
        .iter()
        .position(|week| week.contains(date))
        .map(|index| index + 1)
}

/// A week is past once its last day is behind `today`
pub fn is_week_past(week_end: NaiveDate, today: NaiveDate) -> bool {
    today > week_end
}

/// `MM/DD-MM/DD`
pub fn format_week_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}-{}", start.format("%m/%d"), end.format("%m/%d"))
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}
