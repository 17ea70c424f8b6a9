use anyhow::{Context, Result};
use rusqlite::OptionalExtension;

use super::WeekStore;
use crate::models::week::{WeekKey, WeekSnapshot};
use crate::services::database::Database;

/// Week store persisted in the `week_snapshots` table.
///
/// Each week is one row holding its blocks as JSON.
pub struct SqliteWeekStore {
    db: Database,
}

impl SqliteWeekStore {
    /// Wrap an open database, creating the schema if needed
    pub fn new(db: Database) -> Result<Self> {
        db.initialize_schema()?;
        Ok(Self { db })
    }

    /// Open (or create) the database file at `path`
    pub fn open(path: &str) -> Result<Self> {
        Self::new(Database::new(path)?)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl WeekStore for SqliteWeekStore {
    fn get(&self, key: &WeekKey) -> Result<Option<WeekSnapshot>> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT blocks_json FROM week_snapshots WHERE week_key = ?1",
                [key.to_string()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to load week {}", key))?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to decode snapshot of week {}", key))
        })
        .transpose()
    }

    fn put(&mut self, key: &WeekKey, snapshot: &WeekSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.db
            .connection()
            .execute(
                "INSERT INTO week_snapshots (week_key, blocks_json, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(week_key) DO UPDATE SET
                     blocks_json = excluded.blocks_json,
                     updated_at = CURRENT_TIMESTAMP",
                (key.to_string(), json),
            )
            .with_context(|| format!("Failed to save week {}", key))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<WeekKey>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT week_key FROM week_snapshots")?;
        let raw = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        let mut keys = raw
            .iter()
            .map(|value| {
                value
                    .parse::<WeekKey>()
                    .with_context(|| format!("Corrupt week key in database: {}", value))
            })
            .collect::<Result<Vec<WeekKey>>>()?;
        keys.sort();
        Ok(keys)
    }

    fn clear(&mut self) -> Result<()> {
        self.db
            .connection()
            .execute("DELETE FROM week_snapshots", [])
            .context("Failed to clear week snapshots")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{Lane, TimeBlock};
    use chrono::NaiveDate;

    fn snapshot(hour: u32) -> WeekSnapshot {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let block = TimeBlock::new(
            Lane::Time,
            day.and_hms_opt(hour, 0, 0).unwrap(),
            day.and_hms_opt(hour + 1, 0, 0).unwrap(),
        )
        .unwrap();
        WeekSnapshot::new(vec![block])
    }

    #[test]
    fn test_put_get_and_overwrite() {
        let mut store = SqliteWeekStore::open(":memory:").unwrap();
        let key = WeekKey::new(2025, 10).unwrap();
        assert!(store.get(&key).unwrap().is_none());

        let saved = snapshot(9);
        store.put(&key, &saved).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(saved));

        let replacement = snapshot(14);
        store.put(&key, &replacement).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(replacement));
        assert_eq!(store.keys().unwrap().len(), 1);
    }

    #[test]
    fn test_keys_and_clear() {
        let mut store = SqliteWeekStore::open(":memory:").unwrap();
        let a = WeekKey::new(2024, 52).unwrap();
        let b = WeekKey::new(2025, 1).unwrap();
        store.put(&b, &WeekSnapshot::default()).unwrap();
        store.put(&a, &WeekSnapshot::default()).unwrap();

        assert_eq!(store.keys().unwrap(), vec![a, b]);

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_snapshots_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("weeks.db");
        let path = path.to_str().unwrap();
        let key = WeekKey::new(2025, 10).unwrap();
        let saved = snapshot(9);

        {
            let mut store = SqliteWeekStore::open(path).unwrap();
            store.put(&key, &saved).unwrap();
        }

        let store = SqliteWeekStore::open(path).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(saved));
    }
}
