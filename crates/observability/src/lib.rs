//! Gemi observability: subscriber setup shared by the CLI and the terminal UI.
//!
//! # Quick Start
//!
//! ```no_run
//! use gemi_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("gemi")
//!     .with_log_level("gemi=debug")
//!     .with_console(false);
//!
//! init(config)?;
//! tracing::info!("client started");
//! # Ok::<(), gemi_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name (default `gemi`)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP collector; export is off when unset
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter
//!
//! In the terminal UI the fmt layer is disabled and every event is handed to a
//! [`LogSink`] instead, which feeds the debug screen.

pub mod config;
pub mod error;
pub mod log_sink;
pub mod spans;
pub mod telemetry;

pub use config::{LogSink, ObservabilityConfig};
pub use error::ObservabilityError;
pub use spans::{record_duration, record_error};
pub use telemetry::{init, shutdown};
