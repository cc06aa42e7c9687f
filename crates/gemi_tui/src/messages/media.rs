//! Generated image: caption, URL and the save hint.

use gemi_core::{MediaAttachment, MessageId};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use super::LEFT_BORDER;
use super::assistant::ASSISTANT_INDICATOR;
use crate::layouts::{text_muted_style, text_style};
use crate::theme::GemiPalette;
use crate::utils::{LEFT_PADDING, truncate_ellipsis};

#[derive(Debug, Clone)]
pub struct MediaMessage {
    pub id: MessageId,
    pub media: MediaAttachment,
    pub timestamp: Option<String>,
}

pub const MEDIA_ICON: &str = "🖼 ";

pub fn media_message_lines(msg: &MediaMessage, palette: &GemiPalette, width: usize) -> Vec<Line<'static>> {
    let border = Span::styled(LEFT_BORDER, text_muted_style(palette.text_muted));
    let body_width = width.saturating_sub(LEFT_BORDER.chars().count() + LEFT_PADDING.len() + 3).max(8);

    let mut caption = vec![
        border.clone(),
        Span::styled(ASSISTANT_INDICATOR, text_style(palette.accent)),
        Span::raw(" "),
    ];
    if let Some(t) = &msg.timestamp {
        caption.push(Span::styled(format!("{} ", t), text_muted_style(palette.text_muted)));
    }
    caption.push(Span::styled(msg.media.caption.clone(), text_style(palette.text)));

    let url = Line::from(vec![
        border.clone(),
        Span::raw(LEFT_PADDING),
        Span::raw(MEDIA_ICON),
        Span::styled(
            truncate_ellipsis(&msg.media.url, body_width),
            text_style(palette.info).add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    let hint = Line::from(vec![
        border,
        Span::raw(LEFT_PADDING),
        Span::styled(
            format!("Ctrl+S: save as {}", msg.media.file_name),
            text_muted_style(palette.text_muted),
        ),
    ]);
    vec![Line::from(caption), url, hint]
}
