use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::EngineSettings;

/// File name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService;

impl SettingsService {
    /// Per-user settings location; `None` if the platform has no config dir
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "workweek", "workweek-scheduler")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<EngineSettings> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(EngineSettings::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: EngineSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;

        Ok(settings)
    }

    /// Validate and write settings, creating parent directories as needed
    pub fn save(path: &Path, settings: &EngineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings)?;
        fs::write(path, data)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Load from the default location, or defaults if there is none
    pub fn load_default() -> Result<EngineSettings> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                log::warn!("No config directory available, using default settings");
                Ok(EngineSettings::default())
            }
        }
    }
}
