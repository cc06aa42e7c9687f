//! Environment variable names read by the CLI and runtime.

pub const API_BASE_URL: &str = "GEMI_API_BASE_URL";
pub const REQUEST_TIMEOUT_SECS: &str = "GEMI_REQUEST_TIMEOUT_SECS";
pub const REVEAL_TICK_MS: &str = "GEMI_REVEAL_TICK_MS";
pub const DOWNLOAD_DIR: &str = "GEMI_DOWNLOAD_DIR";
pub const APPEARANCE: &str = "GEMI_APPEARANCE";

/// Keys that `gemi config set` accepts and that are exported to the environment at startup.
pub const CONFIG_KEYS: &[&str] = &[
    API_BASE_URL,
    REQUEST_TIMEOUT_SECS,
    REVEAL_TICK_MS,
    DOWNLOAD_DIR,
    APPEARANCE,
];
