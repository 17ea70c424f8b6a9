// Background day deriver
// Computes which days of the visible week are shaded as rest days

use crate::models::block::{BlockKind, TimeBlock};
use crate::models::week::{BackgroundDay, WeekKey};

/// Shading for the seven days of `week`, Monday first.
///
/// A day is covered when any rest block's covered day range includes it.
/// The result is derived on demand and never stored.
pub fn derive_background_days(blocks: &[TimeBlock], week: &WeekKey) -> Vec<BackgroundDay> {
    let rest_blocks: Vec<&TimeBlock> = blocks
        .iter()
        .filter(|block| block.kind == BlockKind::Rest)
        .collect();

    week.days()
        .map(|date| BackgroundDay {
            date,
            covered: rest_blocks.iter().any(|block| block.covers_day(date)),
        })
        .collect()
}

/// Dates in `week` covered by rest blocks
pub fn covered_dates(blocks: &[TimeBlock], week: &WeekKey) -> Vec<chrono::NaiveDate> {
    derive_background_days(blocks, week)
        .into_iter()
        .filter(|day| day.covered)
        .map(|day| day.date)
        .collect()
}
