//! Runtime configuration

use std::path::PathBuf;
use std::time::Duration;

use gemi_constant::{app, defaults, env};

use crate::error::{Result, RuntimeError};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Delay between reveal steps, within 10..=250 ms
    pub reveal_tick: Duration,
    /// Where saved images are written
    pub download_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            reveal_tick: Duration::from_millis(defaults::REVEAL_TICK_MS),
            download_dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app::DATA_DIR)
            .join(app::DOWNLOADS_DIR)
    })
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Out-of-range values are clamped rather than rejected.
    pub fn with_reveal_tick(mut self, tick: Duration) -> Self {
        let ms = (tick.as_millis() as u64).clamp(defaults::REVEAL_TICK_MIN_MS, defaults::REVEAL_TICK_MAX_MS);
        self.reveal_tick = Duration::from_millis(ms);
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Reads `GEMI_REVEAL_TICK_MS` and `GEMI_DOWNLOAD_DIR`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(raw) = std::env::var(env::REVEAL_TICK_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                RuntimeError::Config(format!("{} must be milliseconds, got {:?}", env::REVEAL_TICK_MS, raw))
            })?;
            config = config.with_reveal_tick(Duration::from_millis(ms));
        }

        if let Some(dir) = std::env::var(env::DOWNLOAD_DIR).ok().filter(|v| !v.trim().is_empty()) {
            config = config.with_download_dir(dir);
        }

        Ok(config)
    }
}
