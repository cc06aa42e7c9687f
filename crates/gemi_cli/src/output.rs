//! Terminal output: styled text for people, one JSON object per line for scripts.
//!
//! - `console` for colors (honors NO_COLOR, off when piped)
//! - `comfy-table` for key/value listings
//! - `indicatif` for the waiting spinner

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

#[derive(Serialize)]
struct Envelope<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn envelope(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let envelope = Envelope { level, message, data };
    serde_json::to_string(&envelope).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", envelope(level, message, data));
}

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

/// Errors go to stderr in both modes.
pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Key/value line with a styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// Structured result. Text mode prints `text` instead.
pub fn data<T: Serialize>(label: &str, value: &T, text: &str) {
    if is_json() {
        let json = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json));
    } else {
        println!("{text}");
    }
}

pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
    table
}

pub fn table_row(table: &mut Table, cells: &[&str]) {
    let mut row = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let cell = Cell::new(cell);
        row.push(if i == 0 { cell.fg(Color::Green) } else { cell });
    }
    table.add_row(row);
}

/// Print a table, or its rows as `items` objects keyed by `headers` in JSON mode.
pub fn table_print(table: &Table, headers: &[&str], rows: &[Vec<String>]) {
    if is_json() {
        let items: Vec<JsonValue> = rows
            .iter()
            .map(|row| {
                let object = headers
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.to_lowercase(), JsonValue::String(v.clone())))
                    .collect::<serde_json::Map<_, _>>();
                JsonValue::Object(object)
            })
            .collect();
        emit_json("list", "", Some(&serde_json::json!({ "items": items })));
    } else {
        println!("{table}");
    }
}

/// Spinner on stderr; hidden in JSON mode so stdout stays machine-readable.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
