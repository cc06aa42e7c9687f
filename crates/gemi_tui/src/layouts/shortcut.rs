//! Shortcut hint line below the input, chosen from the current state.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use super::input::INPUT_PADDING_H;
use super::style::text_muted_style;
use crate::theme::GemiPalette;

/// Aligns the hint with the input content (border + padding).
const SHORTCUT_INSET_H: u16 = 1 + INPUT_PADDING_H;

pub fn shortcut_inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(SHORTCUT_INSET_H),
        width: area.width.saturating_sub(SHORTCUT_INSET_H.saturating_mul(2)),
        ..area
    }
}

pub fn shortcut_line(palette: &GemiPalette, pending: bool, input_has_text: bool, has_media: bool) -> Line<'static> {
    let hint = if pending {
        "Waiting for reply…  ·  Ctrl+L: clear  ·  Ctrl+C: quit"
    } else if input_has_text {
        "Enter: send  ·  Ctrl+U: clear line  ·  Ctrl+C: quit"
    } else if has_media {
        "↑↓: scroll  ·  Ctrl+S: save image  ·  Ctrl+Y: copy  ·  Ctrl+L: clear  ·  Esc: quit"
    } else {
        "↑↓: scroll  ·  Ctrl+Y: copy  ·  Ctrl+L: clear  ·  Ctrl+D: logs  ·  Esc: quit"
    };
    Line::from(Span::styled(hint, text_muted_style(palette.text_muted)))
}
