//! Layout components built from [crate::utils] and [crate::theme].
//!
//! - **[split]**: header, body, footer.
//! - **[style]**: palette [Rgb](crate::theme::Rgb) to ratatui [Style](ratatui::style::Style).
//! - **[head]**: header strip with the activity dot.
//! - **[chats]**: chat body rect.
//! - **[input]**: input box.
//! - **[shortcut]**: hint line below the input.

mod chats;
mod head;
mod input;
mod shortcut;
mod split;
mod style;

pub use chats::{CHAT_MESSAGE_SPACING, ChatsLayout, chat_scroll_offset};
pub use head::{HEADER_TITLE, HeaderDot, header_line, render_header};
pub use input::{INPUT_ICON, INPUT_PLACEHOLDER, block_for_input_bordered};
pub use shortcut::{shortcut_inner_rect, shortcut_line};
pub use split::{FOOTER_HEIGHT, HEADER_HEIGHT, MainSplits, main_splits, vertical_split};
pub use style::{
    background_style, border_style, code_style, danger_style, success_style, text_muted_style, text_style,
    warning_style,
};
