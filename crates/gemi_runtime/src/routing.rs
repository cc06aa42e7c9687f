//! Endpoint selection for submitted text.

use once_cell::sync::Lazy;
use regex::Regex;

use gemi_core::EndpointKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub endpoint: EndpointKind,
    /// Text forwarded to the endpoint
    pub prompt: String,
}

/// Image triggers anywhere in the text, as whole words and case-insensitive,
/// with the separator that follows one ("draw: a cat", "draw - a cat").
/// A dash glued to the next word stays with the prompt ("draw -5 degrees").
static IMAGE_TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:generate\s+image|create\s+image|draw)\b(?:\s*[:,]|\s*-(?:\s|$))?")
        .expect("valid image trigger regex")
});

/// Search only when the text starts with one of these.
static SEARCH_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:search\s*:|search\s+for\b|look\s+up\b)").expect("valid search prefix regex")
});

/// Search prefix, then image triggers, then chat. A search or image request
/// with nothing left after stripping goes to chat with the original text.
pub fn route(text: &str) -> Route {
    let text = text.trim();

    if let Some(found) = SEARCH_PREFIX.find(text) {
        let query = tidy(&text[found.end()..]);
        if !query.is_empty() {
            return Route {
                endpoint: EndpointKind::Search,
                prompt: query,
            };
        }
    }

    if IMAGE_TRIGGER.is_match(text) {
        let prompt = tidy(&IMAGE_TRIGGER.replace_all(text, " "));
        if !prompt.is_empty() {
            return Route {
                endpoint: EndpointKind::Image,
                prompt,
            };
        }
    }

    Route {
        endpoint: EndpointKind::Chat,
        prompt: text.to_string(),
    }
}

fn tidy(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
