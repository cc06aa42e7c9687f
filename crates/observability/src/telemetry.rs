//! Subscriber initialization: env filter, console fmt, optional OTLP export, log sink.

use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;
use crate::error::{ObservabilityError, Result};
use crate::log_sink;

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Install the global subscriber. Fails if the filter directive is invalid or a
/// subscriber is already installed; a failing OTLP exporter only logs a warning.
pub fn init(config: ObservabilityConfig) -> Result<()> {
    let env_filter = match config.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| ObservabilityError::Config(format!("invalid log level {level:?}: {e}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let fmt_layer = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut otlp_warning = None;
    let otel_layer = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => match build_otlp_tracer_provider(&config, endpoint) {
            Ok((tracer, provider)) => {
                global::set_tracer_provider(provider.clone());
                let _ = TRACER_PROVIDER.set(provider);
                Some(OpenTelemetryLayer::new(tracer))
            }
            Err(e) => {
                otlp_warning = Some(e.to_string());
                None
            }
        },
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .with(log_sink::log_sink_layer(config.log_sink.clone()))
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    // Logged only now that a subscriber exists to receive it.
    match (otlp_warning, config.otlp_endpoint.as_deref()) {
        (Some(error), Some(endpoint)) => tracing::warn!(
            otlp.endpoint = %endpoint,
            error = %error,
            "OTLP export unavailable, continuing with local tracing only"
        ),
        (None, Some(endpoint)) => tracing::info!(
            service.name = %config.service_name,
            otlp.endpoint = %endpoint,
            "OTLP tracing enabled"
        ),
        _ => tracing::debug!(service.name = %config.service_name, "Tracing initialized"),
    }

    Ok(())
}

fn build_otlp_tracer_provider(
    config: &ObservabilityConfig,
    endpoint: &str,
) -> Result<(SdkTracer, SdkTracerProvider)> {
    let mut attributes = vec![KeyValue::new("service.name", config.service_name.clone())];
    if let Some(version) = &config.service_version {
        attributes.push(KeyValue::new("service.version", version.clone()));
    }
    let resource = Resource::builder().with_attributes(attributes).build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.to_string())
        .build()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();
    let tracer = provider.tracer(config.service_name.clone());

    Ok((tracer, provider))
}

/// Flush and stop the OTLP exporter, if one was started.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        let _ = provider.shutdown();
        tracing::debug!("OpenTelemetry tracer provider shut down");
    }
}
