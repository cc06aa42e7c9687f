//! Layout helpers for Rects.

use ratatui::layout::Rect;

use crate::utils::constants::HORIZONTAL_PADDING;

/// Apply [HORIZONTAL_PADDING] on the left and right.
#[inline]
pub fn horizontal_padding(area: Rect) -> Rect {
    padding(area, HORIZONTAL_PADDING, 0)
}

/// Apply padding on all four sides.
#[inline]
pub fn padding(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(horizontal),
        y: area.y.saturating_add(vertical),
        width: area.width.saturating_sub(horizontal.saturating_mul(2)),
        height: area.height.saturating_sub(vertical.saturating_mul(2)),
    }
}

/// Clamp a scroll offset so the last content line can sit at the bottom of the viewport.
pub fn scroll_with_buffer(offset: usize, content_height: usize, viewport_height: usize) -> usize {
    let max_offset = content_height.saturating_sub(viewport_height);
    offset.min(max_offset)
}
