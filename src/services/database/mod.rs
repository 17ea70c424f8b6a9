// Database service module
// SQLite connection and schema for persisted week snapshots

mod connection;
mod migrations;
mod schema;

pub use connection::Database;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the snapshot database inside the data directory
pub const DATABASE_FILE: &str = "weeks.db";

/// Per-user location of the snapshot database, creating its directory.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "workweek", "workweek-scheduler")
        .context("Could not determine a data directory for this user")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
    Ok(data_dir.join(DATABASE_FILE))
}
