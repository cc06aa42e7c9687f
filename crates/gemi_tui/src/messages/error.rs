//! Inline error message (✗ icon, danger style).

use gemi_core::MessageId;
use ratatui::text::{Line, Span};

use crate::layouts::danger_style;
use crate::theme::GemiPalette;
use crate::utils::{LEFT_PADDING, wrap_text};

#[derive(Debug, Clone)]
pub struct ErrorMessage {
    pub id: MessageId,
    pub text: String,
    pub timestamp: Option<String>,
}

pub const ERROR_ICON: &str = "✗ ";

pub fn error_message_lines(msg: &ErrorMessage, palette: &GemiPalette, width: usize) -> Vec<Line<'static>> {
    let style = danger_style(palette.danger);
    let wrapped = wrap_text(msg.text.trim(), width.saturating_sub(LEFT_PADDING.len()).max(1));

    let mut first = vec![Span::styled(ERROR_ICON, style)];
    if let Some(t) = &msg.timestamp {
        first.push(Span::styled(format!("{} ", t), style));
    }
    let mut rest = wrapped.into_iter();
    if let Some(head) = rest.next() {
        first.push(Span::styled(head, style));
    }

    let mut lines = vec![Line::from(first)];
    lines.extend(rest.map(|seg| Line::from(vec![Span::raw(LEFT_PADDING), Span::styled(seg, style)])));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_danger_icon() {
        let palette = GemiPalette::gemi_dark();
        let msg = ErrorMessage {
            id: MessageId::new(),
            text: "Sorry, I couldn't connect. Please try again.".into(),
            timestamp: None,
        };
        let lines = error_message_lines(&msg, &palette, 80);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans[0].content.contains('✗'));
        assert_eq!(lines[0].spans[0].style.fg, Some(palette.danger.color()));
    }

    #[test]
    fn wraps_long_text() {
        let msg = ErrorMessage {
            id: MessageId::new(),
            text: "The assistant couldn't answer right now. Please try again.".into(),
            timestamp: Some("14:30".into()),
        };
        let lines = error_message_lines(&msg, &GemiPalette::gemi_dark(), 24);
        assert!(lines.len() > 1);
        assert!(lines[0].spans.iter().any(|s| s.content.contains("14:30")));
    }
}
