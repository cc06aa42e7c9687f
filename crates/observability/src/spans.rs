//! Span helpers shared by the client and runtime crates.

/// Span around one chat exchange, from submit until the reply settles.
///
/// ```rust
/// let span = gemi_observability::exchange_span!("3f2a", "chat");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! exchange_span {
    ($exchange_id:expr, $endpoint:expr) => {
        tracing::info_span!(
            "exchange",
            exchange.id = %$exchange_id,
            endpoint = %$endpoint,
            outcome = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Span around one HTTP call to the backend.
///
/// ```rust
/// let span = gemi_observability::http_request_span!("POST", "http://127.0.0.1:5000/api/chat");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $url:expr) => {
        tracing::debug_span!(
            "http.request",
            http.method = $method,
            http.url = %$url,
            http.status_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Mark the current span as failed and emit a warning event.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::warn!(error = %error, "operation failed");
}

/// Record a duration in milliseconds on the current span under `key`.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    tracing::Span::current().record(key, duration.as_millis() as u64);
}
