//! Chat body layout.

use ratatui::layout::Rect;

use crate::utils::{MESSAGE_SPACING_LINES, scroll_with_buffer};

#[derive(Debug, Clone)]
pub struct ChatsLayout {
    pub area: Rect,
    /// Content rect; the rightmost column is left for the scrollbar.
    pub inner: Rect,
}

impl ChatsLayout {
    pub fn new(area: Rect) -> Self {
        let inner = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        Self { area, inner }
    }

    pub fn scrollbar(&self) -> Rect {
        Rect {
            x: self.area.x + self.area.width.saturating_sub(1),
            width: self.area.width.min(1),
            ..self.area
        }
    }
}

pub fn chat_scroll_offset(offset: usize, content_height: usize, viewport_height: usize) -> usize {
    scroll_with_buffer(offset, content_height, viewport_height)
}

/// Blank lines inserted between messages.
pub const CHAT_MESSAGE_SPACING: usize = MESSAGE_SPACING_LINES;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrollbar_is_last_column() {
        let layout = ChatsLayout::new(Rect::new(2, 2, 40, 10));
        assert_eq!(layout.inner.width, 39);
        assert_eq!(layout.scrollbar().x, 41);
        assert_eq!(layout.scrollbar().width, 1);
    }

    #[test]
    fn zero_size() {
        let layout = ChatsLayout::new(Rect::new(0, 0, 0, 0));
        assert_eq!(layout.inner.width, 0);
        assert_eq!(layout.scrollbar().width, 0);
    }
}
