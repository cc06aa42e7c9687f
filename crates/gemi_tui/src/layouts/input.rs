//! Input box: rounded border, focused glow, horizontal padding.

use ratatui::widgets::{Block, BorderType, Borders, Padding};

use super::style::{background_style, border_style};
use crate::theme::GemiPalette;

/// Horizontal padding inside the input block (each side).
pub const INPUT_PADDING_H: u16 = 2;

pub const INPUT_ICON: &str = "▸ ";

pub const INPUT_PLACEHOLDER: &str = "Ask anything, \"search: …\" or \"draw …\"";

pub fn block_for_input_bordered(palette: &GemiPalette, focused: bool) -> Block<'static> {
    let border = if focused { palette.border_focused } else { palette.border };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(border))
        .style(background_style(palette.status_bar_background))
        .padding(Padding::new(INPUT_PADDING_H, INPUT_PADDING_H, 0, 0))
}
