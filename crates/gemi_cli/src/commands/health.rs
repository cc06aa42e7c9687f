//! `gemi health`

use std::time::Instant;

use anyhow::{Result, anyhow};
use serde::Serialize;

use gemi_client::Backend;
use gemi_tui::utils::format_duration;

use crate::output;

#[derive(Serialize)]
struct HealthReport<'a> {
    base_url: &'a str,
    status: &'a str,
    ok: bool,
    latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'a str>,
}

pub async fn handle(base_url: Option<String>) -> Result<()> {
    let backend = super::build_backend(base_url)?;
    let base_url = backend.config().base_url.clone();

    let spinner = output::spinner(&format!("Checking {base_url}"));
    let started = Instant::now();
    let result = backend.health().await;
    let latency = started.elapsed();
    spinner.finish_and_clear();

    let health = result.map_err(|e| {
        tracing::warn!(error = %e, "health check failed");
        anyhow!("{} is unreachable: {}", base_url, e)
    })?;

    let report = HealthReport {
        base_url: &base_url,
        status: &health.status,
        ok: health.is_ok(),
        latency_ms: latency.as_millis() as u64,
        mode: health.hybrid.as_deref(),
    };

    if output::is_json() {
        output::data("health", &report, "");
    } else {
        if report.ok {
            output::success(&format!("Backend is up ({})", base_url));
        } else {
            output::warning(&format!("Backend answered with status {:?}", report.status));
        }
        output::kv("status", report.status);
        if let Some(mode) = report.mode {
            output::kv("mode", mode);
        }
        output::kv("latency", &format_duration(latency));
    }
    Ok(())
}
