//! Terminal chat surface for gemi.
//!
//! The runtime owns the conversation; this crate only mirrors its display list.
//! [run_tui] draws [gemi_core::DisplayEvent]s as they arrive and turns key
//! presses into [gemi_core::UiCommand]s.

pub mod animation;
pub mod layouts;
pub mod messages;
mod run;
mod runtime_events;
pub mod state;
pub mod theme;
pub mod utils;
mod view;

pub use run::{KeyOutcome, TuiChannels, handle_key, run_tui};
pub use runtime_events::apply_display_event;
pub use state::{Activity, ChatItem, Screen, TuiState};
pub use theme::Appearance;
pub use view::{chat_lines, draw as draw_view};
