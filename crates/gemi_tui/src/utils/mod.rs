//! Shared utilities for the gemi TUI.
//!
//! - **[constants]**: spacing and padding.
//! - **[layout]**: Rect padding and scroll clamping.
//! - **[format]**: wrapping, truncation and durations for status text.

mod constants;
mod format;
mod layout;

pub use constants::*;
pub use format::{format_duration, truncate_ellipsis, wrap_lines, wrap_text};
pub use layout::{horizontal_padding, padding, scroll_with_buffer};
