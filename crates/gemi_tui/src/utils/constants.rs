//! TUI spacing and sizing constants.

/// Horizontal padding in characters (each side).
pub const HORIZONTAL_PADDING: u16 = 2;

/// Left indent for continuation lines (two spaces).
pub const LEFT_PADDING: &str = "  ";

/// Blank lines between message blocks.
pub const MESSAGE_SPACING_LINES: usize = 1;

/// Lines moved per PgUp/PgDn.
pub const PAGE_SCROLL_LINES: usize = 5;

/// Lines moved per mouse wheel notch.
pub const WHEEL_SCROLL_LINES: usize = 3;
