//! The narrow output interface the controller and renderer write through.

use tokio::sync::mpsc;

use gemi_core::{DisplayEvent, EndpointKind, Markup, Message, MessageId, Outcome};

/// Whether a write reached a live message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The target message (or the whole display) is gone; stop writing to it.
    Detached,
}

impl Delivery {
    pub fn is_detached(self) -> bool {
        self == Delivery::Detached
    }
}

/// A display list. Implementations must not block: they are called from reveal ticks.
pub trait DisplaySink: Send + Sync {
    fn emit(&self, event: DisplayEvent) -> Delivery;

    fn show_message(&self, message: Message) -> Delivery {
        self.emit(DisplayEvent::show(message))
    }

    /// Replace the visible prefix of a revealing message.
    fn update_message(&self, id: MessageId, visible: &str) -> Delivery {
        self.emit(DisplayEvent::reveal(id, visible))
    }

    fn settle_message(&self, id: MessageId, markup: Markup) -> Delivery {
        self.emit(DisplayEvent::settle(id, markup))
    }

    fn remove_message(&self, id: MessageId) -> Delivery {
        self.emit(DisplayEvent::remove(id))
    }

    fn clear_input(&self) -> Delivery {
        self.emit(DisplayEvent::ClearInput)
    }

    fn notify(&self, text: &str) -> Delivery {
        self.emit(DisplayEvent::status(text))
    }

    fn exchange_started(&self, endpoint: EndpointKind) -> Delivery {
        self.emit(DisplayEvent::ExchangeStarted { endpoint })
    }

    fn exchange_finished(&self, outcome: Outcome) -> Delivery {
        self.emit(DisplayEvent::ExchangeFinished { outcome })
    }
}

/// Sends events to a surface running its own loop (the TUI). A closed receiver
/// means the surface is gone and every write is detached.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DisplayEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<DisplayEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DisplayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl DisplaySink for ChannelSink {
    fn emit(&self, event: DisplayEvent) -> Delivery {
        match self.tx.send(event) {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::Detached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::channel();
        let message = Message::user("hi");
        let id = message.id;

        assert_eq!(sink.show_message(message), Delivery::Delivered);
        assert_eq!(sink.clear_input(), Delivery::Delivered);
        assert_eq!(sink.remove_message(id), Delivery::Delivered);

        assert!(matches!(rx.try_recv(), Ok(DisplayEvent::Show { .. })));
        assert_eq!(rx.try_recv().ok(), Some(DisplayEvent::ClearInput));
        assert_eq!(rx.try_recv().ok(), Some(DisplayEvent::Remove { id }));
    }

    #[test]
    fn closed_channel_is_detached() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);
        assert!(sink.notify("anyone?").is_detached());
    }
}
