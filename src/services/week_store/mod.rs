// Week store
// Per-week cache of block-set snapshots, keyed by ISO week

mod sqlite;

pub use sqlite::SqliteWeekStore;

use anyhow::Result;
use std::collections::BTreeMap;

use crate::models::week::{WeekKey, WeekSnapshot};

/// Storage-agnostic cache of week snapshots.
///
/// A store never invents data: `get` returns exactly what was last `put`.
/// Deciding what an unsaved week starts with is up to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait WeekStore {
    fn get(&self, key: &WeekKey) -> Result<Option<WeekSnapshot>>;

    fn put(&mut self, key: &WeekKey, snapshot: &WeekSnapshot) -> Result<()>;

    /// All weeks that have a snapshot, oldest first
    fn keys(&self) -> Result<Vec<WeekKey>>;

    /// Forget every week
    fn clear(&mut self) -> Result<()>;
}

/// Process-local store used by default sessions and tests
#[derive(Debug, Default, Clone)]
pub struct InMemoryWeekStore {
    weeks: BTreeMap<WeekKey, WeekSnapshot>,
}

impl InMemoryWeekStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl WeekStore for InMemoryWeekStore {
    fn get(&self, key: &WeekKey) -> Result<Option<WeekSnapshot>> {
        Ok(self.weeks.get(key).cloned())
    }

    fn put(&mut self, key: &WeekKey, snapshot: &WeekSnapshot) -> Result<()> {
        self.weeks.insert(*key, snapshot.clone());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<WeekKey>> {
        Ok(self.weeks.keys().copied().collect())
    }

    fn clear(&mut self) -> Result<()> {
        self.weeks.clear();
        Ok(())
    }
}
