//! Split the terminal area into header, body and footer regions.

use ratatui::layout::Rect;

use crate::utils::horizontal_padding;

/// Header: title line plus bottom border.
pub const HEADER_HEIGHT: u16 = 2;

/// Footer: bordered input (3 lines) plus the shortcut line.
pub const FOOTER_HEIGHT: u16 = 4;

#[derive(Debug, Clone)]
pub struct MainSplits {
    pub header: Rect,
    /// Padded horizontally. Zero height when the terminal is too small.
    pub body: Rect,
    pub footer: Rect,
}

pub fn main_splits(area: Rect) -> MainSplits {
    let body_h = area.height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT);
    let (header, rest) = vertical_split(area, HEADER_HEIGHT);
    let (body, footer) = vertical_split(rest, body_h);
    MainSplits {
        header,
        body: horizontal_padding(body),
        footer,
    }
}

/// Split into top and bottom with a given top height.
pub fn vertical_split(area: Rect, top_height: u16) -> (Rect, Rect) {
    let top_h = top_height.min(area.height);
    let top = Rect {
        height: top_h,
        ..area
    };
    let bottom = Rect {
        y: area.y.saturating_add(top_h),
        height: area.height.saturating_sub(top_h),
        ..area
    };
    (top, bottom)
}
