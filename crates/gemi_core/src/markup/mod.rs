//! Minimal markup dialect for assistant replies.
//!
//! Recognized, in precedence order: fenced code blocks (```` ```lang ````),
//! inline code, `**bold**`, `*italic*`, and line breaks. Anything else,
//! including unterminated delimiters, stays literal text.

mod translator;

use serde::{Deserialize, Serialize};

pub use translator::{MarkupRule, RegexRule, Translator, translate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Bold { text: String },
    Italic { text: String },
    InlineCode { code: String },
    CodeBlock { lang: Option<String>, code: String },
    LineBreak,
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }
}

/// Translator output: a flat run of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    pub segments: Vec<Segment>,
}

impl Markup {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Unformatted text as one segment; empty input has no segments.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::Text { text }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Text with formatting dropped and line breaks restored.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text { text } | Segment::Bold { text } | Segment::Italic { text } => {
                    out.push_str(text)
                }
                Segment::InlineCode { code } => out.push_str(code),
                Segment::CodeBlock { code, .. } => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str(code);
                    out.push('\n');
                }
                Segment::LineBreak => out.push('\n'),
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text { text } => out.push_str(&escape_html(text)),
                Segment::Bold { text } => {
                    out.push_str("<strong>");
                    out.push_str(&escape_html(text));
                    out.push_str("</strong>");
                }
                Segment::Italic { text } => {
                    out.push_str("<em>");
                    out.push_str(&escape_html(text));
                    out.push_str("</em>");
                }
                Segment::InlineCode { code } => {
                    out.push_str("<code>");
                    out.push_str(&escape_html(code));
                    out.push_str("</code>");
                }
                Segment::CodeBlock { lang, code } => {
                    match lang {
                        Some(lang) => {
                            out.push_str("<pre><code class=\"language-");
                            out.push_str(&escape_html(lang));
                            out.push_str("\">");
                        }
                        None => out.push_str("<pre><code>"),
                    }
                    out.push_str(&escape_html(code));
                    out.push_str("</code></pre>");
                }
                Segment::LineBreak => out.push_str("<br>"),
            }
        }
        out
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
