//! Incremental renderer: reveals a reply one code point per tick, then settles it.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use gemi_core::{Message, MessageId};

use crate::reveal::RevealCursor;
use crate::schedule::RepeatingTask;
use crate::sink::DisplaySink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Full text shown and replaced by its markup
    Settled,
    /// The message left the display before settling
    Detached,
    Cancelled,
}

type ActiveReveals = Arc<Mutex<HashMap<MessageId, CancellationToken>>>;

#[derive(Clone)]
pub struct Renderer {
    sink: Arc<dyn DisplaySink>,
    tick: Duration,
    active: ActiveReveals,
}

impl Renderer {
    pub fn new(sink: Arc<dyn DisplaySink>, tick: Duration) -> Self {
        Self {
            sink,
            tick,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Show a new assistant message and start revealing `full_text` into it.
    pub fn reveal(&self, full_text: impl Into<String>) -> Reveal {
        let message = Message::revealing();
        let id = message.id;
        let token = CancellationToken::new();

        if self.sink.show_message(message).is_detached() {
            token.cancel();
        } else if let Ok(mut active) = self.active.lock() {
            active.insert(id, token.clone());
        }

        let sink = Arc::clone(&self.sink);
        let mut cursor = Some(RevealCursor::new(full_text));
        let task = RepeatingTask::spawn_with_token(self.tick, token, move || {
            let Some(current) = cursor.as_mut() else {
                return ControlFlow::Break(RevealOutcome::Cancelled);
            };
            if let Some(visible) = current.advance() {
                if sink.update_message(id, visible).is_detached() {
                    return ControlFlow::Break(RevealOutcome::Detached);
                }
            }
            if !current.is_complete() {
                return ControlFlow::Continue(());
            }
            let Some(done) = cursor.take() else {
                return ControlFlow::Break(RevealOutcome::Cancelled);
            };
            if sink.settle_message(id, done.settle()).is_detached() {
                ControlFlow::Break(RevealOutcome::Detached)
            } else {
                ControlFlow::Break(RevealOutcome::Settled)
            }
        });

        tracing::debug!(message.id = %id, tick_ms = self.tick.as_millis() as u64, "reveal started");
        Reveal {
            id,
            task: Some(task),
            active: Arc::clone(&self.active),
        }
    }

    /// Stop the reveal into `id`, if one is running. Returns whether one was.
    pub fn cancel(&self, id: MessageId) -> bool {
        let token = self.active.lock().ok().and_then(|mut active| active.remove(&id));
        match token {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Stop every running reveal; used when the display is torn down.
    pub fn cancel_all(&self) -> usize {
        let tokens: Vec<_> = match self.active.lock() {
            Ok(mut active) => active.drain().map(|(_, token)| token).collect(),
            Err(_) => Vec::new(),
        };
        for token in &tokens {
            token.cancel();
        }
        tokens.len()
    }

    pub fn active_reveals(&self) -> usize {
        self.active.lock().map(|active| active.len()).unwrap_or(0)
    }
}

/// A running reveal. Dropping it cancels the reveal.
pub struct Reveal {
    id: MessageId,
    task: Option<RepeatingTask<RevealOutcome>>,
    active: ActiveReveals,
}

impl Reveal {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.cancel();
        }
    }

    pub async fn finished(mut self) -> RevealOutcome {
        match self.task.take() {
            Some(task) => task.join().await.unwrap_or(RevealOutcome::Cancelled),
            None => RevealOutcome::Cancelled,
        }
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        if let Ok(mut active) = self.active.lock() {
            active.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use gemi_core::{RenderStage, translate};

    use super::*;
    use crate::testing::{RecordingSink, settled_markup};

    fn renderer(sink: &Arc<RecordingSink>) -> Renderer {
        Renderer::new(sink.clone(), Duration::from_millis(35))
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_emits_len_plus_one_updates_then_settles() {
        let sink = Arc::new(RecordingSink::default());
        let reveal = renderer(&sink).reveal("Hi *you*");
        let id = reveal.id();

        assert_eq!(reveal.finished().await, RevealOutcome::Settled);

        let updates = sink.reveal_updates(id);
        assert_eq!(updates.len(), "Hi *you*".chars().count() + 1);
        assert_eq!(updates.first().map(String::as_str), Some(""));
        assert_eq!(updates.last().map(String::as_str), Some("Hi *you*"));

        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].stage, RenderStage::Settled);
        assert_eq!(settled_markup(&messages[0]), Some(&translate("Hi *you*")));
    }

    #[tokio::test(start_paused = true)]
    async fn updates_are_strictly_growing_and_raw() {
        let sink = Arc::new(RecordingSink::default());
        let reveal = renderer(&sink).reveal("**b**");
        let id = reveal.id();
        reveal.finished().await;

        let lens: Vec<usize> = sink.reveal_updates(id).iter().map(|u| u.chars().count()).collect();
        assert_eq!(lens, vec![0, 1, 2, 3, 4, 5]);
        assert!(sink.reveal_updates(id).contains(&"**b".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_takes_one_tick_per_code_point() {
        let sink = Arc::new(RecordingSink::default());
        let start = tokio::time::Instant::now();
        renderer(&sink).reveal("abcd").finished().await;
        // first update is immediate, the remaining four follow at 35 ms each
        assert_eq!(start.elapsed(), Duration::from_millis(4 * 35));
    }

    #[tokio::test(start_paused = true)]
    async fn removed_message_stops_the_reveal() {
        let sink = Arc::new(RecordingSink::default());
        let renderer = renderer(&sink);
        let reveal = renderer.reveal("a fairly long answer");
        let id = reveal.id();

        tokio::time::sleep(Duration::from_millis(100)).await;
        sink.drop_message(id);

        assert_eq!(reveal.finished().await, RevealOutcome::Detached);
        let written = sink.reveal_updates(id).len();
        assert!(written < "a fairly long answer".chars().count());
        assert!(!sink.events().iter().any(|e| matches!(e, gemi_core::DisplayEvent::Settle { .. })));
        assert_eq!(renderer.active_reveals(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_leaves_no_active_reveals() {
        let sink = Arc::new(RecordingSink::default());
        let renderer = renderer(&sink);
        let first = renderer.reveal("first reply");
        let second = renderer.reveal("second reply");
        assert_eq!(renderer.active_reveals(), 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(renderer.cancel_all(), 2);
        assert_eq!(renderer.active_reveals(), 0);

        assert_eq!(first.finished().await, RevealOutcome::Cancelled);
        assert_eq!(second.finished().await, RevealOutcome::Cancelled);

        let count = sink.events().len();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.events().len(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_by_id() {
        let sink = Arc::new(RecordingSink::default());
        let renderer = renderer(&sink);
        let reveal = renderer.reveal("hello");
        let id = reveal.id();

        assert!(renderer.cancel(id));
        assert!(!renderer.cancel(id));
        assert_eq!(reveal.finished().await, RevealOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn detached_display_never_starts() {
        let sink = Arc::new(RecordingSink::default());
        sink.detach();
        let renderer = renderer(&sink);
        let reveal = renderer.reveal("nobody is watching");

        assert_eq!(renderer.active_reveals(), 0);
        assert_eq!(reveal.finished().await, RevealOutcome::Cancelled);
        assert!(sink.events().is_empty());
    }
}
