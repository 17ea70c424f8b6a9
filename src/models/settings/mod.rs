// Settings module
// Tunables of the scheduling engine, loaded from settings.toml

use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// What an editing session shows for a week that has never been saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekEntryPolicy {
    /// Start with an empty week
    #[default]
    Empty,
    /// Copy the previous week's saved blocks, shifted forward by seven days
    InheritPrevious,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Grid that gesture endpoints snap to
    pub snap_minutes: u32,
    /// Blocks shorter than this are dropped without notice
    pub min_block_minutes: u32,
    /// Lifetime of a rejection alert
    pub alert_ttl_secs: u32,
    /// Cap on undo history entries; unbounded when absent
    pub history_limit: Option<usize>,
    pub week_entry_policy: WeekEntryPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            snap_minutes: 15,
            min_block_minutes: 15,
            alert_ttl_secs: 3,
            history_limit: None,
            week_entry_policy: WeekEntryPolicy::Empty,
        }
    }
}

impl EngineSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), String> {
        if self.snap_minutes == 0 {
            return Err("snap_minutes must be greater than zero".to_string());
        }

        if MINUTES_PER_DAY % self.snap_minutes != 0 {
            return Err(format!(
                "snap_minutes must divide a day evenly, got {}",
                self.snap_minutes
            ));
        }

        if self.min_block_minutes == 0 {
            return Err("min_block_minutes must be greater than zero".to_string());
        }

        if self.alert_ttl_secs == 0 {
            return Err("alert_ttl_secs must be greater than zero".to_string());
        }

        if self.history_limit == Some(0) {
            return Err("history_limit must keep at least one entry".to_string());
        }

        Ok(())
    }

    pub fn min_block_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.min_block_minutes))
    }

    pub fn alert_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.alert_ttl_secs))
    }
}
