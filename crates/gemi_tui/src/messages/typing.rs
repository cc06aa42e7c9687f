//! Typing placeholder shown while an exchange is pending.

use ratatui::text::{Line, Span};

use super::LEFT_BORDER;
use crate::animation::Shimmer;
use crate::layouts::text_muted_style;
use crate::theme::GemiPalette;

pub const TYPING_DOTS: &str = "● ● ●";

pub fn typing_line(shimmer: Option<&Shimmer>, palette: &GemiPalette) -> Line<'static> {
    let mut spans = vec![Span::styled(LEFT_BORDER, text_muted_style(palette.text_muted))];
    match shimmer {
        Some(shimmer) => spans.extend(shimmer.styled_spans(TYPING_DOTS, palette)),
        None => spans.push(Span::styled(TYPING_DOTS, text_muted_style(palette.text_muted))),
    }
    Line::from(spans)
}
