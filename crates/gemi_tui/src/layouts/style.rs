//! Map palette colors to ratatui styles so chrome stays consistent with the theme.

use ratatui::style::Style;

use crate::theme::{GemiPalette, Rgb};

pub fn border_style(rgb: Rgb) -> Style {
    Style::default().fg(rgb.color())
}

pub fn background_style(rgb: Rgb) -> Style {
    Style::default().bg(rgb.color())
}

pub fn text_style(rgb: Rgb) -> Style {
    Style::default().fg(rgb.color())
}

pub fn text_muted_style(rgb: Rgb) -> Style {
    Style::default().fg(rgb.color())
}

pub fn success_style(rgb: Rgb) -> Style {
    Style::default().fg(rgb.color())
}

pub fn danger_style(rgb: Rgb) -> Style {
    Style::default().fg(rgb.color())
}

pub fn warning_style(rgb: Rgb) -> Style {
    Style::default().fg(rgb.color())
}

/// Inline code: accent on the element fill.
pub fn code_style(palette: &GemiPalette) -> Style {
    Style::default()
        .fg(palette.accent.color())
        .bg(palette.element_background.color())
}
