//! Formatting helpers for TUI text (durations, truncation, wrapping).

use std::time::Duration;

use unicode_width::UnicodeWidthStr;

/// Format a duration for display (e.g. "123ms", "2s 450ms").
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        let s = ms / 1000;
        let rest_ms = ms % 1000;
        if rest_ms == 0 {
            format!("{}s", s)
        } else {
            format!("{}s {}ms", s, rest_ms)
        }
    }
}

/// Truncate to at most `max_chars` characters, ending in "…" when cut.
pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Word-wrap one paragraph to lines of at most `width` display columns.
/// Long words are pushed as their own line. Whitespace-only input gives no lines.
pub fn wrap_lines(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut line = String::new();
    for word in s.split_whitespace() {
        let word_width = word.width();
        let need = if line.is_empty() {
            word_width
        } else {
            line.width() + 1 + word_width
        };
        if need <= width {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        } else {
            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if word_width <= width {
                line = word.to_string();
            } else {
                out.push(word.to_string());
            }
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

/// Like [wrap_lines] but keeps explicit line breaks; blank source lines stay blank.
pub fn wrap_text(s: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in s.split('\n') {
        let wrapped = wrap_lines(paragraph, width);
        if wrapped.is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrapped);
        }
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}
