//! Render translated [Markup] to styled terminal lines.
//!
//! Inline segments flow into word-wrapped lines that keep each span's style.
//! Code blocks break the flow and get a line-number gutter plus simple
//! keyword highlighting.

use gemi_core::{Markup, Segment};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::layouts::{code_style, text_muted_style, text_style};
use crate::theme::GemiPalette;

/// Lines for `markup` at most `width` columns wide (code lines are never wrapped).
pub fn markup_lines(markup: &Markup, palette: &GemiPalette, width: usize) -> Vec<Line<'static>> {
    let normal = text_style(palette.text);
    let mut flow = Flow::new(width.max(1));
    let mut after_block = false;

    for segment in &markup.segments {
        match segment {
            Segment::Text { text } => flow.push(text, normal),
            Segment::Bold { text } => flow.push(text, normal.add_modifier(Modifier::BOLD)),
            Segment::Italic { text } => flow.push(text, normal.add_modifier(Modifier::ITALIC)),
            Segment::InlineCode { code } => flow.push_unbroken(code, code_style(palette)),
            // a code block already ends its own line
            Segment::LineBreak if after_block => {}
            Segment::LineBreak => flow.break_line(),
            Segment::CodeBlock { lang, code } => {
                flow.end_paragraph();
                flow.out
                    .extend(code_block_lines(lang.as_deref().unwrap_or(""), code, palette));
            }
        }
        after_block = matches!(segment, Segment::CodeBlock { .. });
    }
    flow.finish()
}

/// Greedy word wrapper over styled pieces.
struct Flow {
    width: usize,
    out: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_width: usize,
    /// A separating space waiting for the next word, styled like the text it came from.
    pending_space: Option<Style>,
}

impl Flow {
    fn new(width: usize) -> Self {
        Self {
            width,
            out: Vec::new(),
            current: Vec::new(),
            current_width: 0,
            pending_space: None,
        }
    }

    fn push(&mut self, text: &str, style: Style) {
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 && self.current_width > 0 {
                self.pending_space = Some(style);
            }
            if !word.is_empty() {
                self.word(word, style);
            }
        }
    }

    /// Inline code keeps its inner spaces and wraps as one unit.
    fn push_unbroken(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.word(text, style);
        }
    }

    fn word(&mut self, word: &str, style: Style) {
        let space = usize::from(self.pending_space.is_some());
        let w = word.width();
        if self.current_width > 0 && self.current_width + space + w > self.width {
            self.break_line();
        }
        if let Some(space_style) = self.pending_space.take() {
            self.current.push(Span::styled(" ", space_style));
            self.current_width += 1;
        }
        self.current.push(Span::styled(word.to_string(), style));
        self.current_width += w;
    }

    /// End the current line; an empty one becomes a blank line.
    fn break_line(&mut self) {
        self.out.push(Line::from(std::mem::take(&mut self.current)));
        self.current_width = 0;
        self.pending_space = None;
    }

    fn end_paragraph(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.end_paragraph();
        self.out
    }
}

fn code_block_lines(lang: &str, code: &str, palette: &GemiPalette) -> Vec<Line<'static>> {
    let code_lines: Vec<&str> = if code.is_empty() { vec![""] } else { code.lines().collect() };
    let num_w = code_lines.len().to_string().len();
    let gutter = text_muted_style(palette.editor_line_number);

    code_lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut spans = vec![Span::styled(format!("{:>num_w$} │ ", i + 1), gutter)];
            spans.extend(highlight_code_line(line, lang, palette));
            Line::from(spans)
        })
        .collect()
}

fn keywords_for_lang(lang: &str) -> &'static [&'static str] {
    match lang.to_lowercase().as_str() {
        "rust" | "rs" => &[
            "fn", "let", "mut", "impl", "pub", "use", "mod", "struct", "enum", "trait", "if", "else", "match", "for",
            "in", "while", "loop", "return", "async", "await", "self", "Self", "true", "false",
        ],
        "python" | "py" => &[
            "def", "class", "if", "else", "elif", "for", "in", "while", "return", "import", "from", "True", "False",
            "None", "and", "or", "not", "with", "async", "await", "lambda",
        ],
        "javascript" | "js" | "typescript" | "ts" => &[
            "function", "const", "let", "var", "return", "if", "else", "for", "while", "async", "await", "true",
            "false", "null", "undefined", "class", "extends", "import", "export", "new",
        ],
        "sh" | "bash" | "shell" => &["if", "then", "else", "fi", "for", "do", "done", "echo", "export", "function"],
        _ => &[],
    }
}

fn highlight_code_line(line: &str, lang: &str, palette: &GemiPalette) -> Vec<Span<'static>> {
    let keywords = keywords_for_lang(lang);
    let keyword = text_style(palette.accent);
    let string = text_style(palette.success);
    let comment = text_muted_style(palette.text_muted);
    let number = text_style(palette.warning);
    let normal = text_style(palette.editor_foreground);

    let mut spans = Vec::new();
    let mut plain = String::new();
    let bytes = line.as_bytes();
    let mut i = 0;

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::styled(std::mem::take(plain), normal));
        }
    };

    while i < bytes.len() {
        let b = bytes[i];
        if line[i..].starts_with("//") || (b == b'#' && (i == 0 || bytes[i - 1] == b' ')) {
            flush(&mut plain, &mut spans);
            spans.push(Span::styled(line[i..].to_string(), comment));
            return spans;
        }
        if b == b'"' || b == b'\'' {
            flush(&mut plain, &mut spans);
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i] != b {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            spans.push(Span::styled(line[start..i].to_string(), string));
            continue;
        }
        if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let word = &line[start..i];
            if keywords.contains(&word) {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(word.to_string(), keyword));
            } else {
                plain.push_str(word);
            }
            continue;
        }
        if b.is_ascii_digit() {
            flush(&mut plain, &mut spans);
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            spans.push(Span::styled(line[start..i].to_string(), number));
            continue;
        }
        // copy one whole UTF-8 char
        let ch_len = line[i..].chars().next().map_or(1, char::len_utf8);
        plain.push_str(&line[i..i + ch_len]);
        i += ch_len;
    }
    flush(&mut plain, &mut spans);
    if spans.is_empty() {
        spans.push(Span::styled(String::new(), normal));
    }
    spans
}
