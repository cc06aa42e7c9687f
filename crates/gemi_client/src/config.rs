//! Backend endpoint configuration.

use std::time::Duration;

use gemi_constant::{defaults, env};
use gemi_core::EndpointKind;

use crate::error::{BackendError, Result};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL without trailing slash (default: http://127.0.0.1:5000/api)
    pub base_url: String,
    /// Whole-request timeout; expiry counts as a transport failure
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
            timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Reads `GEMI_API_BASE_URL` and `GEMI_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = std::env::var(env::API_BASE_URL).ok().filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Ok(raw) = std::env::var(env::REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                BackendError::Config(format!("{} must be a whole number of seconds, got {:?}", env::REQUEST_TIMEOUT_SECS, raw))
            })?;
            config = config.with_timeout(Duration::from_secs(secs.max(1)));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| BackendError::Config(format!("invalid base URL {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BackendError::Config(format!(
                "base URL must be http or https, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn endpoint_url(&self, kind: EndpointKind) -> String {
        format!("{}/{}", self.base_url, kind.as_str())
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Absolute media URLs pass through; relative ones resolve against the base.
    pub fn resolve_media_url(&self, url: &str) -> Result<reqwest::Url> {
        if let Ok(absolute) = reqwest::Url::parse(url) {
            return Ok(absolute);
        }
        let base = reqwest::Url::parse(&format!("{}/", self.base_url))
            .map_err(|e| BackendError::Config(e.to_string()))?;
        base.join(url)
            .map_err(|e| BackendError::Config(format!("invalid media URL {:?}: {}", url, e)))
    }
}
