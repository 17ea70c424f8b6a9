// Editing session
//
// Owns the live block set of the visible week. Gestures are snapped to the
// grid, resolved against the current set, committed to history and written
// through to the week store. Rejections go to the notification sink.

mod gesture;
pub mod keymap;

pub use gesture::{MoveGesture, ResizeGesture, SlotSelection};
pub use keymap::{HistoryAction, KeyPress};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::models::block::{BlockId, TimeBlock};
use crate::models::settings::{EngineSettings, WeekEntryPolicy};
use crate::models::week::{BackgroundDay, WeekArchive, WeekChange, WeekKey, WeekSnapshot};
use crate::services::background::derive_background_days;
use crate::services::history::HistoryStore;
use crate::services::notification::{AlertQueue, NotificationSink};
use crate::services::resolver::{self, ChangeKind, Intent, Rejection, Resolution};
use crate::services::week_store::{InMemoryWeekStore, WeekStore};
use crate::utils::date::snap_to_grid;

/// Failures that are not part of normal editing
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no block with id {0}")]
    UnknownBlock(BlockId),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Gestures discarded before conflict checks, without notifying anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRejection {
    /// Shorter than the minimum block length, as drawn or after snapping
    TooShort,
}

/// What a session call did to the block set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum Outcome {
    Applied(ChangeKind),
    Dropped(ValidationRejection),
    Rejected(Rejection),
    /// Nothing to do (undo at the oldest entry, unbound key, ...)
    Unchanged,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

pub struct EditorSession<S: WeekStore, N: NotificationSink> {
    settings: EngineSettings,
    store: S,
    sink: N,
    active_week: WeekKey,
    blocks: Vec<TimeBlock>,
    history: HistoryStore,
}

impl EditorSession<InMemoryWeekStore, AlertQueue> {
    /// Session backed by an in-memory store and an alert queue
    pub fn in_memory(settings: EngineSettings, today: NaiveDate) -> Result<Self, EngineError> {
        let alerts = AlertQueue::from_settings(&settings);
        Self::open(settings, InMemoryWeekStore::new(), alerts, today)
    }
}

impl<S: WeekStore, N: NotificationSink> EditorSession<S, N> {
    /// Open a session showing the week that contains `today`
    pub fn open(
        settings: EngineSettings,
        mut store: S,
        sink: N,
        today: NaiveDate,
    ) -> Result<Self, EngineError> {
        settings.validate().map_err(EngineError::InvalidSettings)?;

        let active_week = WeekKey::from_date(today);
        let blocks = load_week(&mut store, &settings, &active_week)?;
        let mut history = HistoryStore::with_limit(settings.history_limit);
        history.reset(blocks.clone());

        Ok(Self {
            settings,
            store,
            sink,
            active_week,
            blocks,
            history,
        })
    }

    /// Create a block from an empty-slot selection
    pub fn select_slot(&mut self, selection: SlotSelection) -> Result<Outcome, EngineError> {
        let Some((start, end)) = self.normalize(selection.start, selection.end) else {
            return Ok(Outcome::Dropped(ValidationRejection::TooShort));
        };

        let candidate = match TimeBlock::new(selection.lane, start, end) {
            Ok(block) => block,
            Err(_) => return Ok(Outcome::Dropped(ValidationRejection::TooShort)),
        };
        self.apply(Intent::Create { candidate })
    }

    /// Drag a block to a new position
    pub fn move_block(&mut self, gesture: MoveGesture) -> Result<Outcome, EngineError> {
        let block = self.find(&gesture.block_id)?;
        let Some((start, end)) = self.normalize(gesture.new_start, gesture.new_end) else {
            return Ok(Outcome::Dropped(ValidationRejection::TooShort));
        };

        let candidate = block.with_span(start, end);
        self.apply(Intent::Move {
            candidate,
            dropped_on_all_day: gesture.dropped_on_all_day,
        })
    }

    /// Move one or both edges of a block
    pub fn resize_block(&mut self, gesture: ResizeGesture) -> Result<Outcome, EngineError> {
        let block = self.find(&gesture.block_id)?;
        let Some((start, end)) = self.normalize(gesture.new_start, gesture.new_end) else {
            return Ok(Outcome::Dropped(ValidationRejection::TooShort));
        };

        let candidate = block.with_span(start, end);
        self.apply(Intent::Resize { candidate })
    }

    pub fn delete_block(&mut self, id: &BlockId) -> Result<Outcome, EngineError> {
        let next = resolver::remove(&self.blocks, id)
            .ok_or_else(|| EngineError::UnknownBlock(id.clone()))?;
        self.commit(next, ChangeKind::Deleted)
    }

    pub fn undo(&mut self) -> Result<Outcome, EngineError> {
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(Outcome::Unchanged);
        };
        self.restore(snapshot, ChangeKind::Undone).inspect_err(|_| {
            self.history.redo();
        })
    }

    pub fn redo(&mut self) -> Result<Outcome, EngineError> {
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(Outcome::Unchanged);
        };
        self.restore(snapshot, ChangeKind::Redone).inspect_err(|_| {
            self.history.undo();
        })
    }

    /// Route an undo/redo shortcut; other keys are ignored
    pub fn handle_key(&mut self, press: KeyPress) -> Result<Outcome, EngineError> {
        match keymap::history_action(&press) {
            Some(HistoryAction::Undo) => self.undo(),
            Some(HistoryAction::Redo) => self.redo(),
            None => Ok(Outcome::Unchanged),
        }
    }

    /// Show the week containing `date`. Loading another week starts a
    /// fresh history; `None` if `date` is already in the visible week.
    pub fn navigate_to(&mut self, date: NaiveDate) -> Result<Option<WeekChange>, EngineError> {
        let target = WeekKey::from_date(date);
        if target == self.active_week {
            return Ok(None);
        }

        let blocks = load_week(&mut self.store, &self.settings, &target)?;
        let change = WeekChange {
            from: self.active_week,
            to: target,
        };

        log::info!("Switched week {} -> {}", change.from, change.to);
        self.active_week = target;
        self.history.reset(blocks.clone());
        self.blocks = blocks;
        Ok(Some(change))
    }

    pub fn next_week(&mut self) -> Result<Option<WeekChange>, EngineError> {
        self.navigate_to(self.active_week.next().monday())
    }

    pub fn previous_week(&mut self) -> Result<Option<WeekChange>, EngineError> {
        self.navigate_to(self.active_week.previous().monday())
    }

    /// Jump back to the week containing `today`, as reported by the host clock
    pub fn go_to_today(&mut self, today: NaiveDate) -> Result<Option<WeekChange>, EngineError> {
        self.navigate_to(today)
    }

    /// Live blocks of the visible week, ordered by start
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&TimeBlock> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub fn active_week(&self) -> WeekKey {
        self.active_week
    }

    pub fn background_days(&self) -> Vec<BackgroundDay> {
        derive_background_days(&self.blocks, &self.active_week)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    /// Every week the store has seen, for handing to persistence
    pub fn export(&self) -> Result<WeekArchive, EngineError> {
        let mut archive = WeekArchive::default();
        for key in self.store.keys()? {
            if let Some(snapshot) = self.store.get(&key)? {
                archive.weeks.insert(key, snapshot);
            }
        }
        Ok(archive)
    }

    fn find(&self, id: &BlockId) -> Result<TimeBlock, EngineError> {
        self.block(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownBlock(id.clone()))
    }

    /// Snap both endpoints; `None` if the span is below the minimum length
    /// either as drawn or after snapping.
    fn normalize(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let minimum = self.settings.min_block_duration();
        if end - start < minimum {
            log::debug!("Dropping span {} - {}: below minimum length", start, end);
            return None;
        }

        let start = snap_to_grid(start, self.settings.snap_minutes);
        let end = snap_to_grid(end, self.settings.snap_minutes);
        if end - start < minimum {
            log::debug!("Dropping snapped span {} - {}: below minimum length", start, end);
            return None;
        }
        Some((start, end))
    }

    fn apply(&mut self, intent: Intent) -> Result<Outcome, EngineError> {
        match resolver::resolve(&self.blocks, &intent) {
            Resolution::Accepted { blocks, change } => self.commit(blocks, change),
            Resolution::Rejected(rejection) => {
                log::warn!("Rejected {}: {}", intent.candidate().id, rejection);
                self.sink.notify(rejection);
                Ok(Outcome::Rejected(rejection))
            }
        }
    }

    fn commit(&mut self, blocks: Vec<TimeBlock>, change: ChangeKind) -> Result<Outcome, EngineError> {
        debug_assert!(
            blocks.iter().all(|block| block.validate().is_ok()),
            "resolved set holds an invalid block: {:?}",
            blocks.iter().find(|block| block.validate().is_err())
        );
        self.write_active(&blocks)?;
        log::debug!("{:?}: week {} now has {} blocks", change, self.active_week, blocks.len());
        self.history.commit(blocks.clone());
        self.blocks = blocks;
        Ok(Outcome::Applied(change))
    }

    fn restore(&mut self, blocks: Vec<TimeBlock>, change: ChangeKind) -> Result<Outcome, EngineError> {
        self.write_active(&blocks)?;
        log::debug!("{:?}: history cursor at {}", change, self.history.cursor());
        self.blocks = blocks;
        Ok(Outcome::Applied(change))
    }

    fn write_active(&mut self, blocks: &[TimeBlock]) -> Result<(), EngineError> {
        self.store
            .put(&self.active_week, &WeekSnapshot::new(blocks.to_vec()))?;
        Ok(())
    }
}

/// Blocks for `week`, applying the entry policy to weeks never saved.
/// A first visit is written back so the week shows up in exports.
fn load_week<S: WeekStore>(
    store: &mut S,
    settings: &EngineSettings,
    week: &WeekKey,
) -> Result<Vec<TimeBlock>, EngineError> {
    if let Some(snapshot) = store.get(week)? {
        log::info!("Loaded week {} ({} blocks)", week, snapshot.blocks.len());
        return Ok(snapshot.blocks);
    }

    let blocks = match settings.week_entry_policy {
        WeekEntryPolicy::Empty => Vec::new(),
        WeekEntryPolicy::InheritPrevious => store
            .get(&week.previous())?
            .map(|previous| {
                previous
                    .blocks
                    .iter()
                    .map(|block| block.shifted(Duration::days(7)).with_id(BlockId::generate()))
                    .collect()
            })
            .unwrap_or_default(),
    };

    log::info!("First visit to week {} ({} inherited blocks)", week, blocks.len());
    store.put(week, &WeekSnapshot::new(blocks.clone()))?;
    Ok(blocks)
}
