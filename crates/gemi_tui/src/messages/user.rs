//! User message: accent border and `»`, wrapped body, optional timestamp.

use gemi_core::MessageId;
use ratatui::text::{Line, Span};

use super::LEFT_BORDER;
use crate::layouts::{text_muted_style, text_style};
use crate::theme::GemiPalette;
use crate::utils::{LEFT_PADDING, wrap_text};

#[derive(Debug, Clone)]
pub struct UserMessage {
    pub id: MessageId,
    pub text: String,
    /// Short local time, e.g. "10:32".
    pub timestamp: Option<String>,
}

pub const USER_INDICATOR: &str = "»";

pub fn user_message_lines(msg: &UserMessage, palette: &GemiPalette, width: usize) -> Vec<Line<'static>> {
    let indent_len = LEFT_PADDING.len() + LEFT_BORDER.chars().count();
    let wrapped = wrap_text(msg.text.trim(), width.saturating_sub(indent_len).max(1));
    let border = Span::styled(LEFT_BORDER, text_style(palette.accent));

    let mut first = vec![
        border.clone(),
        Span::styled(USER_INDICATOR, text_style(palette.accent)),
        Span::raw(" "),
    ];
    if let Some(t) = &msg.timestamp {
        first.push(Span::styled(format!("{} ", t), text_muted_style(palette.text_muted)));
    }
    let mut rest = wrapped.into_iter();
    if let Some(head) = rest.next() {
        first.push(Span::styled(head, text_style(palette.text)));
    }

    let mut lines = vec![Line::from(first)];
    for seg in rest {
        lines.push(Line::from(vec![
            border.clone(),
            Span::raw(LEFT_PADDING),
            Span::styled(seg, text_style(palette.text)),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: &str, timestamp: Option<&str>) -> UserMessage {
        UserMessage {
            id: MessageId::new(),
            text: text.into(),
            timestamp: timestamp.map(Into::into),
        }
    }

    #[test]
    fn first_line_has_indicator_and_border() {
        let lines = user_message_lines(&msg("Hello world", None), &GemiPalette::gemi_dark(), 40);
        assert!(lines[0].spans.iter().any(|s| s.content.as_ref() == USER_INDICATOR));
        assert!(lines[0].spans.iter().any(|s| s.content.contains('│')));
    }

    #[test]
    fn wraps_long_text() {
        let lines = user_message_lines(&msg("one two three four five six seven", None), &GemiPalette::gemi_dark(), 12);
        assert!(lines.len() > 1);
    }

    #[test]
    fn keeps_explicit_breaks() {
        let lines = user_message_lines(&msg("first\nsecond", None), &GemiPalette::gemi_dark(), 40);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn empty_text_still_renders() {
        assert_eq!(user_message_lines(&msg("", None), &GemiPalette::gemi_dark(), 40).len(), 1);
    }

    #[test]
    fn shows_timestamp() {
        let lines = user_message_lines(&msg("hi", Some("09:15")), &GemiPalette::gemi_dark(), 40);
        assert!(lines[0].spans.iter().any(|s| s.content.contains("09:15")));
    }
}
