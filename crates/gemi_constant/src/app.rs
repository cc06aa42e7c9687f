//! Application metadata constants

pub const NAME: &str = "gemi";
pub const DISPLAY_NAME: &str = "Gemi";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Terminal chat client for a generative-AI backend proxy";

/// Directory under the user's home holding the database, env file and downloads
pub const DATA_DIR: &str = ".gemi";
pub const DB_FILE: &str = "gemi.db";
/// Optional KEY=VALUE file inside DATA_DIR, loaded with dotenvy
pub const ENV_FILE: &str = "env";
pub const DOWNLOADS_DIR: &str = "downloads";
