use serde::{Deserialize, Serialize};

use crate::exchange::{EndpointKind, Outcome};
use crate::markup::Markup;
use crate::message::{Message, MessageId};

/// Display-list mutations emitted by the runtime and applied by a surface, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayEvent {
    Show { message: Message },

    /// Replace the visible prefix of a revealing message.
    Reveal { id: MessageId, visible: String },

    /// Final content of a revealed message; the message is settled afterwards.
    Settle { id: MessageId, markup: Markup },

    Remove { id: MessageId },

    ClearInput,

    /// Transient notice (rejected submit, saved file, ...).
    Status { message: String },

    ExchangeStarted { endpoint: EndpointKind },

    ExchangeFinished { outcome: Outcome },
}

impl DisplayEvent {
    pub fn show(message: Message) -> Self {
        DisplayEvent::Show { message }
    }

    pub fn reveal(id: MessageId, visible: impl Into<String>) -> Self {
        DisplayEvent::Reveal {
            id,
            visible: visible.into(),
        }
    }

    pub fn settle(id: MessageId, markup: Markup) -> Self {
        DisplayEvent::Settle { id, markup }
    }

    pub fn remove(id: MessageId) -> Self {
        DisplayEvent::Remove { id }
    }

    pub fn status(message: impl Into<String>) -> Self {
        DisplayEvent::Status {
            message: message.into(),
        }
    }

    /// Id of the message this event targets, if any.
    pub fn target(&self) -> Option<MessageId> {
        match self {
            DisplayEvent::Show { message } => Some(message.id),
            DisplayEvent::Reveal { id, .. }
            | DisplayEvent::Settle { id, .. }
            | DisplayEvent::Remove { id } => Some(*id),
            _ => None,
        }
    }
}

/// Requests from the input surface to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    Submit { text: String },
    /// The surface dropped its message list; running reveals must stop.
    ClearChat,
    SaveMedia { url: String, file_name: String },
}
