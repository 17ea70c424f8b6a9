use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_week_snapshots_table(conn)?;
    run_week_snapshot_migrations(conn)?;
    Ok(())
}

fn create_week_snapshots_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS week_snapshots (
            week_key TEXT PRIMARY KEY,
            blocks_json TEXT NOT NULL DEFAULT '{\"blocks\":[]}',
            updated_at TEXT
        )",
        [],
    )
    .context("Failed to create week_snapshots table")?;

    Ok(())
}

fn run_week_snapshot_migrations(conn: &Connection) -> Result<()> {
    // SQLite rejects non-constant defaults in ALTER TABLE, so the column is nullable.
    migrations::ensure_column(
        conn,
        "week_snapshots",
        "updated_at",
        "ALTER TABLE week_snapshots ADD COLUMN updated_at TEXT",
    )?;

    Ok(())
}
