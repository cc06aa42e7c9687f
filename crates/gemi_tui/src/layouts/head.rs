//! Header strip: title on the left, activity dot and status on the right.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::style::{background_style, border_style, danger_style, success_style, text_muted_style, text_style, warning_style};
use crate::theme::GemiPalette;
use crate::utils::horizontal_padding;

pub const HEADER_TITLE: &str = gemi_constant::app::DISPLAY_NAME;

/// Color of the status dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDot {
    /// Green
    Idle,
    /// Yellow
    Pending,
    /// Red
    Failed,
}

pub fn header_line(title: &str, status: &str, dot: HeaderDot, palette: &GemiPalette, width: u16) -> Line<'static> {
    let title_style = text_style(palette.text).add_modifier(Modifier::BOLD);
    let dot_style = match dot {
        HeaderDot::Idle => success_style(palette.success),
        HeaderDot::Pending => warning_style(palette.warning),
        HeaderDot::Failed => danger_style(palette.danger),
    };
    let used = title.width() + 2 + status.width();
    let gap = (width as usize).saturating_sub(used);
    Line::from(vec![
        Span::styled(title.to_string(), title_style),
        Span::raw(" ".repeat(gap)),
        Span::styled("● ", dot_style),
        Span::styled(status.to_string(), text_muted_style(palette.text_muted)),
    ])
}

pub fn render_header(frame: &mut Frame, area: Rect, palette: &GemiPalette, status: &str, dot: HeaderDot) {
    let inner = horizontal_padding(area);
    let bg = background_style(palette.status_bar_background);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(border_style(palette.border))
        .style(bg);
    frame.render_widget(block, area);
    let line = header_line(HEADER_TITLE, status, dot, palette, inner.width);
    frame.render_widget(Paragraph::new(line).style(bg), inner);
}
