//! Configuration for tracing and telemetry

use std::sync::Arc;

/// Receives each formatted log line. Called from the tracing layer; must not block.
pub type LogSink = Arc<dyn Fn(String) + Send + Sync>;

pub const DEFAULT_SERVICE_NAME: &str = "gemi";

#[derive(Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans
    pub service_name: String,

    pub service_version: Option<String>,

    /// OTLP endpoint for span export (e.g. "http://localhost:4317")
    pub otlp_endpoint: Option<String>,

    /// Write formatted events to stderr. Must be off while the TUI owns the terminal.
    pub enable_console: bool,

    /// Filter directive (e.g. "info", "gemi_runtime=debug"). Defaults to "info".
    pub log_level: Option<String>,

    pub log_sink: Option<LogSink>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            log_sink: None,
        }
    }
}

impl std::fmt::Debug for ObservabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservabilityConfig")
            .field("service_name", &self.service_name)
            .field("service_version", &self.service_version)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .field("enable_console", &self.enable_console)
            .field("log_level", &self.log_level)
            .field("log_sink", &self.log_sink.as_ref().map(|_| "Some(LogSink)"))
            .finish()
    }
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Forward every event line to `sink` (the TUI debug screen).
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` → service_name
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint (export stays off when unset)
    /// - `OTEL_LOG_LEVEL` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            service_name: non_empty("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            service_version: None,
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
            enable_console: true,
            log_level: non_empty("OTEL_LOG_LEVEL").or_else(|| non_empty("RUST_LOG")),
            log_sink: None,
        }
    }
}
