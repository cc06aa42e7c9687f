//! Command dispatch.

pub mod ask;
pub mod config;
pub mod health;
pub mod session;
pub mod tui;

use anyhow::{Context, Result};
use gemi_client::{BackendConfig, HttpBackend};
use gemi_constant::app;
use gemi_core::SessionId;
use gemi_observability::{ObservabilityConfig, init};

use crate::cli::{Cli, Command};
use crate::output;

pub async fn handle(cli: Cli) -> Result<()> {
    if !matches!(cli.command, Command::Tui { .. }) {
        init_console_logging(cli.verbose);
    }

    let result = match cli.command {
        Command::Tui { base_url, light } => tui::handle(base_url, light).await,
        Command::Ask {
            text,
            base_url,
            no_stream,
        } => ask::handle(text.join(" "), base_url, no_stream).await,
        Command::Health { base_url } => health::handle(base_url).await,
        Command::Session { action } => session::handle(action),
        Command::Config { action } => config::handle(action),
    };
    gemi_observability::shutdown();
    result
}

/// Logs to stderr; quiet unless `--verbose` or a level is set in the environment.
fn init_console_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(app::VERSION);
    if verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() {
        config = config.with_log_level("warn");
    }
    if let Err(e) = init(config) {
        output::warning(&format!("Logging init failed (continuing): {}", e));
    }
}

/// Backend from the environment, with `--base-url` taking precedence.
pub(crate) fn build_backend(base_url: Option<String>) -> Result<HttpBackend> {
    let mut config = BackendConfig::from_env()?;
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    Ok(HttpBackend::new(config)?)
}

/// Persisted session id, created on first use.
pub(crate) fn load_session() -> Result<SessionId> {
    let conn = gemi_core::db::open_db().context("open session store")?;
    Ok(SessionId::load_or_create(&conn)?)
}
