//! Open the DB with WAL and migrations.

use anyhow::{Context, Result};
use std::path::Path;

use super::layout;
use super::migrations;

/// Opens gemi.db under `root`, creating the layout and running migrations.
pub fn open_db_at(root: &Path) -> Result<rusqlite::Connection> {
    let db_path = layout::ensure_data_dir_at(root)?;
    let conn = rusqlite::Connection::open(&db_path).context("open gemi.db")?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
    migrations::run_all(&conn)?;
    Ok(conn)
}

/// Opens `~/.gemi/gemi.db`.
pub fn open_db() -> Result<rusqlite::Connection> {
    open_db_at(&layout::data_dir())
}
