//! Assistant message: raw text with a cursor while revealing, styled markup once settled.

use gemi_core::{Markup, MessageId};
use ratatui::text::{Line, Span};

use super::LEFT_BORDER;
use super::markup::markup_lines;
use crate::layouts::{text_muted_style, text_style};
use crate::theme::GemiPalette;
use crate::utils::{LEFT_PADDING, wrap_text};

#[derive(Debug, Clone, PartialEq)]
pub enum AssistantBody {
    /// Visible prefix, shown verbatim
    Revealing(String),
    Settled(Markup),
}

#[derive(Debug, Clone)]
pub struct AssistantMessage {
    pub id: MessageId,
    pub body: AssistantBody,
    pub timestamp: Option<String>,
}

impl AssistantMessage {
    pub fn is_revealing(&self) -> bool {
        matches!(self.body, AssistantBody::Revealing(_))
    }

    /// What Ctrl+Y copies.
    pub fn plain_text(&self) -> String {
        match &self.body {
            AssistantBody::Revealing(text) => text.clone(),
            AssistantBody::Settled(markup) => markup.plain_text(),
        }
    }
}

pub const ASSISTANT_INDICATOR: &str = "▸";

/// Cursor drawn after revealing text.
pub const STREAMING_CURSOR: &str = "▌";

/// Indicator (and timestamp) on the first line, two-space indent after; the cursor
/// is drawn only while revealing and when `cursor_visible` (blink phase).
pub fn assistant_message_lines(
    msg: &AssistantMessage,
    palette: &GemiPalette,
    width: usize,
    cursor_visible: bool,
) -> Vec<Line<'static>> {
    let border = Span::styled(LEFT_BORDER, text_muted_style(palette.text_muted));
    let body_width = width
        .saturating_sub(LEFT_BORDER.chars().count() + LEFT_PADDING.len())
        .max(1);

    let mut body: Vec<Line<'static>> = match &msg.body {
        AssistantBody::Revealing(text) => wrap_text(text, body_width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, text_style(palette.text))))
            .collect(),
        AssistantBody::Settled(markup) => markup_lines(markup, palette, body_width),
    };
    if body.is_empty() {
        body.push(Line::default());
    }
    if msg.is_revealing() && cursor_visible {
        if let Some(last) = body.last_mut() {
            last.spans.push(Span::styled(STREAMING_CURSOR, text_style(palette.accent)));
        }
    }

    let mut first_prefix = vec![
        border.clone(),
        Span::styled(ASSISTANT_INDICATOR, text_style(palette.accent)),
        Span::raw(" "),
    ];
    if let Some(t) = &msg.timestamp {
        first_prefix.push(Span::styled(format!("{} ", t), text_muted_style(palette.text_muted)));
    }

    body.into_iter()
        .enumerate()
        .map(|(i, line)| {
            let mut spans = if i == 0 {
                first_prefix.clone()
            } else {
                vec![border.clone(), Span::raw(LEFT_PADDING)]
            };
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}
