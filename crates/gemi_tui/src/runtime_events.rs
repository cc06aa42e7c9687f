//! Map [gemi_core::DisplayEvent] to [TuiState] updates.

use gemi_core::{DisplayEvent, Outcome};

use crate::animation::Shimmer;
use crate::state::{Activity, TuiState};

/// Apply one runtime event. Writes to ids no longer on screen (e.g. after Ctrl+L)
/// are dropped; the runtime cancels those reveals itself.
pub fn apply_display_event(state: &mut TuiState, event: DisplayEvent) {
    match event {
        DisplayEvent::Show { message } => {
            if message.is_typing() {
                state.typing_shimmer.get_or_insert_with(Shimmer::new);
            }
            state.show_message(message);
        }
        DisplayEvent::Reveal { id, visible } => {
            state.reveal(id, visible);
        }
        DisplayEvent::Settle { id, markup } => {
            state.settle(id, markup);
        }
        DisplayEvent::Remove { id } => {
            state.remove(id);
            if !state.has_typing() {
                state.typing_shimmer = None;
            }
        }
        DisplayEvent::ClearInput => state.input_clear_line(),
        DisplayEvent::Status { message } => state.set_status(message),
        DisplayEvent::ExchangeStarted { endpoint } => {
            state.clear_status();
            state.set_activity(Activity::Pending(endpoint));
        }
        DisplayEvent::ExchangeFinished { outcome } => {
            let activity = match outcome {
                Outcome::Failure { .. } => Activity::Failed,
                Outcome::Success | Outcome::Pending => Activity::Idle,
            };
            state.set_activity(activity);
        }
    }
}
