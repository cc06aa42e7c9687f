//! `gemi tui`: the interactive chat, with the controller on the tokio runtime
//! and the terminal loop on a blocking thread.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use gemi_constant::{app, env};
use gemi_core::UiCommand;
use gemi_observability::{LogSink, ObservabilityConfig, init};
use gemi_runtime::{AppContext, ChannelSink, Controller, RuntimeConfig};
use gemi_tui::{Appearance, TuiChannels, run_tui};

use crate::output;

const TUI_LOG_LEVEL: &str = "info,gemi_runtime=debug,gemi_client=debug";

/// Applies UI commands until the UI goes away or `shutdown` fires. Submits run
/// as their own tasks so a second submit reaches the controller (and is
/// rejected there) while the first is pending.
async fn run_runtime_loop(
    controller: Controller,
    mut commands: mpsc::UnboundedReceiver<UiCommand>,
    shutdown: CancellationToken,
) {
    let mut tasks = JoinSet::new();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            command = commands.recv() => {
                let Some(command) = command else { break };
                match command {
                    UiCommand::Submit { text } => {
                        let controller = controller.clone();
                        tasks.spawn(async move {
                            controller.submit(&text).await;
                        });
                    }
                    UiCommand::ClearChat => controller.clear_view(),
                    UiCommand::SaveMedia { url, file_name } => {
                        let controller = controller.clone();
                        tasks.spawn(async move {
                            let _ = controller.save_media(&url, &file_name).await;
                        });
                    }
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    tracing::warn!(error = %e, "runtime task failed");
                }
            }
        }
    }
    controller.clear_view();
    tasks.abort_all();
}

fn appearance(light: bool) -> Appearance {
    if light {
        return Appearance::Light;
    }
    match std::env::var(env::APPEARANCE) {
        Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
            tracing::warn!(error = %e, "ignoring {}", env::APPEARANCE);
            Appearance::default()
        }),
        Err(_) => Appearance::default(),
    }
}

pub async fn handle(base_url: Option<String>, light: bool) -> Result<()> {
    // Runtime logs go to the debug screen (Ctrl+D); console output would corrupt the alternate screen.
    let (log_tx, log_rx) = mpsc::unbounded_channel::<String>();
    let log_sink: LogSink = Arc::new(move |line| {
        let _ = log_tx.send(line);
    });
    let mut obs_config = ObservabilityConfig::from_env()
        .with_version(app::VERSION)
        .with_console(false)
        .with_log_sink(log_sink);
    if obs_config.log_level.is_none() {
        obs_config = obs_config.with_log_level(TUI_LOG_LEVEL);
    }
    if let Err(e) = init(obs_config) {
        output::warning(&format!("Observability init failed (continuing): {}", e));
    }

    let backend = super::build_backend(base_url)?;
    tracing::info!(base_url = %backend.config().base_url, "starting tui");
    let session = super::load_session()?;
    let config = RuntimeConfig::from_env()?;
    let appearance = appearance(light);

    let (sink, event_rx) = ChannelSink::channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let controller = Controller::new(AppContext::new(
        Arc::new(sink),
        Arc::new(backend),
        session,
        config,
    ));

    let shutdown = CancellationToken::new();
    let runtime = tokio::spawn(run_runtime_loop(controller, command_rx, shutdown.clone()));

    let channels = TuiChannels {
        events: event_rx,
        commands: command_tx,
        logs: Some(log_rx),
    };
    let result = tokio::task::spawn_blocking(move || run_tui(channels, appearance)).await;

    shutdown.cancel();
    let _ = runtime.await;
    result?
}
