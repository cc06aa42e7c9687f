//! `~/.gemi/` directory layout.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use gemi_constant::app;

/// `~/.gemi`, or `./.gemi` when no home directory is known.
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app::DATA_DIR)
}

/// Ensures `root` and `root/downloads` exist; returns the path to gemi.db.
pub fn ensure_data_dir_at(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root).context("create gemi data dir")?;
    std::fs::create_dir_all(root.join(app::DOWNLOADS_DIR)).context("create downloads dir")?;
    Ok(root.join(app::DB_FILE))
}
