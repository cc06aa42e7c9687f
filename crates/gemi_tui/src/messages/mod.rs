//! Message rendering for the TUI. Colors come from [crate::theme].
//!
//! - **user**: user bubble with accent border.
//! - **assistant**: revealing plain text or settled markup.
//! - **markup**: [gemi_core::Markup] segments to styled lines.
//! - **media**: generated image caption, URL and save hint.
//! - **error**: inline failure notice.
//! - **typing**: shimmering placeholder.

pub mod assistant;
pub mod error;
pub mod markup;
pub mod media;
pub mod typing;
pub mod user;

/// Left border for assistant-side messages.
pub(crate) const LEFT_BORDER: &str = "│ ";
