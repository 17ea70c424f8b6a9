// Undo/Redo History
//
// Linear snapshot history of the live block set. Every accepted change
// commits a full copy; undo and redo move a cursor and hand back the
// snapshot to restore. Committing after an undo discards the redo branch.

use crate::models::block::TimeBlock;

/// Full copy of the block set at one point in time
pub type Snapshot = Vec<TimeBlock>;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStore {
    entries: Vec<Snapshot>,
    cursor: usize,
    /// Maximum number of entries to keep; unbounded when `None`
    limit: Option<usize>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    /// Empty history: a single empty snapshot under the cursor
    pub fn new() -> Self {
        Self {
            entries: vec![Vec::new()],
            cursor: 0,
            limit: None,
        }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|limit| limit.max(1)),
            ..Self::new()
        }
    }

    /// Record a new state, dropping anything that was undone
    pub fn commit(&mut self, blocks: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(blocks);
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            let overflow = self.entries.len().saturating_sub(limit);
            if overflow > 0 {
                self.entries.drain(..overflow);
                self.cursor -= overflow;
            }
        }
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Start over from a loaded state (e.g. after switching weeks)
    pub fn reset(&mut self, blocks: Snapshot) {
        self.entries = vec![blocks];
        self.cursor = 0;
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
