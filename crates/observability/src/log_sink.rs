//! Tracing layer that forwards formatted event lines to a [`LogSink`].

use std::fmt::Write;

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};

use crate::config::LogSink;

/// Longest line handed to the sink, in chars.
const MAX_LINE_CHARS: usize = 8_000;

/// Collects `message` first, then `key=value` pairs in recording order.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        write!(self.fields, "{}={}", name, value).ok();
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (true, _) => self.fields,
            (false, true) => self.message,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            write!(self.message, "{:?}", value).ok();
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// "[LEVEL] target: message key=value", cut to [`MAX_LINE_CHARS`].
pub(crate) fn format_line(level: &tracing::Level, target: &str, rest: &str) -> String {
    let line = if rest.is_empty() {
        format!("[{}] {}", level, target)
    } else {
        format!("[{}] {}: {}", level, target, rest)
    };
    let total = line.chars().count();
    if total > MAX_LINE_CHARS {
        let head: String = line.chars().take(MAX_LINE_CHARS).collect();
        format!("{}… ({} chars)", head, total)
    } else {
        line
    }
}

pub(crate) fn log_sink_layer(sink: Option<LogSink>) -> LogSinkLayer {
    LogSinkLayer { sink }
}

#[derive(Clone)]
pub(crate) struct LogSinkLayer {
    sink: Option<LogSink>,
}

impl<S> Layer<S> for LogSinkLayer
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        sink(format_line(meta.level(), meta.target(), &visitor.finish()));
    }
}
