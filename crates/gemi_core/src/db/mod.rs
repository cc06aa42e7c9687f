//! SQLite store under `~/.gemi/`.
//!
//! - `gemi.db` + WAL: config key/value table (also holds the session id).
//! - `env`: optional KEY=VALUE file loaded at startup.
//! - `downloads/`: default target for saved images.

mod config;
mod connection;
mod layout;
mod migrations;

pub use config::{delete_config, get_config, get_config_value, set_config};
pub use connection::{open_db, open_db_at};
pub use layout::{data_dir, ensure_data_dir_at};
pub use migrations::run_all as run_migrations;
