//! Request controller: one exchange at a time, from submit to settled reply.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::Instrument;

use gemi_client::{BackendError, Reply};
use gemi_constant::defaults;
use gemi_core::{EndpointKind, Exchange, MediaAttachment, Message, MessageId, Outcome};
use gemi_observability::{exchange_span, record_duration, record_error};

use crate::context::AppContext;
use crate::error::Result;
use crate::renderer::{RevealOutcome, Renderer};
use crate::routing;
use crate::sink::DisplaySink;

const BUSY_NOTICE: &str = "Still answering your last message. Please wait.";

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Another exchange was pending; nothing was shown besides a notice
    Rejected,
    Completed(Exchange),
}

#[derive(Clone)]
pub struct Controller {
    ctx: AppContext,
    renderer: Renderer,
    busy: Arc<AtomicBool>,
}

impl Controller {
    pub fn new(ctx: AppContext) -> Self {
        let renderer = Renderer::new(Arc::clone(&ctx.sink), ctx.config.reveal_tick);
        Self {
            ctx,
            renderer,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// True from the moment a submit is accepted until its reply settles or its error shows.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one exchange for `text`.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("submit rejected, exchange pending");
            self.ctx.sink.notify(BUSY_NOTICE);
            return SubmitOutcome::Rejected;
        };

        let sink = &self.ctx.sink;
        sink.show_message(Message::user(text));
        sink.clear_input();

        let route = routing::route(text);
        let mut exchange = Exchange::new(text, route.endpoint, route.prompt);
        let span = exchange_span!(exchange.id, exchange.endpoint);

        async {
            let started = Instant::now();
            sink.exchange_started(exchange.endpoint);

            let placeholder = TypingPlaceholder::show(Arc::clone(sink));
            let result = self
                .ctx
                .backend
                .send(exchange.endpoint, &exchange.prompt, Some(&self.ctx.session))
                .await;
            placeholder.remove();

            match result {
                Ok(reply) => {
                    self.present(exchange.endpoint, reply).await;
                    exchange.succeed();
                }
                Err(error) => {
                    self.present_error(&error);
                    exchange.fail(error.to_string());
                }
            }

            record_duration("duration_ms", started.elapsed());
            let span = tracing::Span::current();
            match &exchange.outcome {
                Outcome::Failure { .. } => span.record("outcome", "failure"),
                _ => span.record("outcome", "success"),
            };
            tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "exchange finished");
            sink.exchange_finished(exchange.outcome.clone());
        }
        .instrument(span)
        .await;

        SubmitOutcome::Completed(exchange)
    }

    async fn present(&self, endpoint: EndpointKind, reply: Reply) {
        match reply {
            Reply::Media(url) => {
                let media = MediaAttachment::new(defaults::IMAGE_CAPTION, url);
                self.ctx.sink.show_message(Message::media(media));
            }
            Reply::Text(text) => {
                let outcome = self.renderer.reveal(text).finished().await;
                if outcome != RevealOutcome::Settled {
                    tracing::debug!(endpoint = %endpoint, ?outcome, "reply not settled");
                }
            }
        }
    }

    fn present_error(&self, error: &BackendError) {
        record_error(error);
        self.ctx.sink.show_message(Message::error(error.user_message()));
    }

    /// The surface dropped its messages: stop every running reveal.
    pub fn clear_view(&self) {
        let cancelled = self.renderer.cancel_all();
        tracing::debug!(cancelled, "view cleared");
    }

    /// Download a generated image into the configured directory.
    pub async fn save_media(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        let saved = self.download(url, file_name).await;
        match &saved {
            Ok(path) => {
                tracing::info!(path = %path.display(), "media saved");
                self.ctx.sink.notify(&format!("Saved image to {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, url, "media save failed");
                self.ctx.sink.notify(&format!("Couldn't save image: {}", e));
            }
        }
        saved
    }

    async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        let bytes = self.ctx.backend.fetch_media(url).await?;
        let dir = &self.ctx.config.download_dir;
        tokio::fs::create_dir_all(dir).await?;
        let path = unused_path(dir, file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// `dir/name`, or `dir/stem-N.ext` for the first N that does not exist yet.
/// Only the final component of `file_name` is used.
fn unused_path(dir: &Path, file_name: &str) -> PathBuf {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(defaults::MEDIA_FILE_NAME);
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem}-{n}.{ext}")),
            None => dir.join(format!("{stem}-{n}")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Held for the whole exchange; released on every path, including a dropped future.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The "assistant is typing" message. Removed exactly once: by `remove`, or on drop.
struct TypingPlaceholder {
    id: MessageId,
    sink: Arc<dyn DisplaySink>,
}

impl TypingPlaceholder {
    fn show(sink: Arc<dyn DisplaySink>) -> Self {
        let message = Message::typing();
        let id = message.id;
        sink.show_message(message);
        Self { id, sink }
    }

    fn remove(self) {}
}

impl Drop for TypingPlaceholder {
    fn drop(&mut self) {
        self.sink.remove_message(self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gemi_core::{DisplayEvent, MessageContent, Origin, RenderStage, SessionId, translate};

    use super::*;
    use crate::config::RuntimeConfig;
    use crate::testing::{RecordingSink, ScriptedBackend, settled_markup};

    fn controller(sink: &Arc<RecordingSink>, backend: ScriptedBackend) -> (Controller, Arc<ScriptedBackend>) {
        let backend = Arc::new(backend);
        let config = RuntimeConfig::new().with_reveal_tick(Duration::from_millis(35));
        let ctx = AppContext::new(sink.clone(), backend.clone(), SessionId::generate(), config);
        (Controller::new(ctx), backend)
    }

    fn typing_events(sink: &RecordingSink) -> (usize, usize) {
        let events = sink.events();
        let typing_ids: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::Show { message } if message.is_typing() => Some(message.id),
                _ => None,
            })
            .collect();
        let removed = events
            .iter()
            .filter(|e| matches!(e, DisplayEvent::Remove { id } if typing_ids.contains(id)))
            .count();
        (typing_ids.len(), removed)
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_is_ignored() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, backend) = controller(&sink, ScriptedBackend::default());

        for text in ["", "   ", "\n\t"] {
            assert!(matches!(controller.submit(text).await, SubmitOutcome::Ignored));
        }
        assert!(sink.events().is_empty());
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn chat_reply_is_revealed_and_settled() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, backend) = controller(&sink, ScriptedBackend::default().reply("Hi **there**"));

        let outcome = controller.submit("  hello  ").await;
        let SubmitOutcome::Completed(exchange) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(exchange.outcome, Outcome::Success);
        assert_eq!(exchange.endpoint, EndpointKind::Chat);
        assert_eq!(backend.prompts(), vec!["hello"]);

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].origin, Origin::User);
        assert_eq!(messages[0].content, MessageContent::text("hello"));
        assert_eq!(messages[1].origin, Origin::Assistant);
        assert_eq!(messages[1].stage, RenderStage::Settled);
        assert_eq!(settled_markup(&messages[1]), Some(&translate("Hi **there**")));

        assert_eq!(typing_events(&sink), (1, 1));
        assert!(!controller.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn event_order_for_one_exchange() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, _) = controller(&sink, ScriptedBackend::default().reply("ok"));
        controller.submit("hi").await;

        let kinds: Vec<&str> = sink
            .events()
            .iter()
            .map(|e| match e {
                DisplayEvent::Show { message } if message.origin == Origin::User => "user",
                DisplayEvent::Show { message } if message.is_typing() => "typing",
                DisplayEvent::Show { .. } => "assistant",
                DisplayEvent::ClearInput => "clear_input",
                DisplayEvent::ExchangeStarted { .. } => "started",
                DisplayEvent::Remove { .. } => "remove_typing",
                DisplayEvent::Reveal { .. } => "reveal",
                DisplayEvent::Settle { .. } => "settle",
                DisplayEvent::ExchangeFinished { .. } => "finished",
                DisplayEvent::Status { .. } => "status",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "user",
                "clear_input",
                "started",
                "typing",
                "remove_typing",
                "assistant",
                "reveal",
                "reveal",
                "reveal",
                "settle",
                "finished",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn image_reply_is_settled_media_without_reveal() {
        let sink = Arc::new(RecordingSink::default());
        let backend = ScriptedBackend::default().reply("https://img.example.com/fox.png");
        let (controller, backend) = controller(&sink, backend);

        controller.submit("draw a fox").await;

        assert_eq!(backend.prompts(), vec!["a fox"]);
        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        match &messages[1].content {
            MessageContent::Media { media } => {
                assert_eq!(media.url, "https://img.example.com/fox.png");
                assert_eq!(media.caption, defaults::IMAGE_CAPTION);
                assert_eq!(media.file_name, "fox.png");
            }
            other => panic!("expected media, got {other:?}"),
        }
        assert_eq!(messages[1].stage, RenderStage::Settled);
        assert!(!sink.events().iter().any(|e| matches!(e, DisplayEvent::Reveal { .. })));
        assert_eq!(typing_events(&sink), (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_shows_one_error() {
        let sink = Arc::new(RecordingSink::default());
        let backend = ScriptedBackend::default().fail(BackendError::Decode("eof".to_string()));
        let (controller, _) = controller(&sink, backend);

        let SubmitOutcome::Completed(exchange) = controller.submit("hello").await else {
            panic!("expected completion");
        };
        assert!(matches!(exchange.outcome, Outcome::Failure { .. }));

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1].content,
            MessageContent::error("Sorry, I couldn't connect. Please try again.")
        );
        assert!(!messages.iter().any(Message::is_typing));
        assert_eq!(typing_events(&sink), (1, 1));
        assert!(!sink.events().iter().any(|e| matches!(e, DisplayEvent::Reveal { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn status_500_shows_remote_text() {
        let sink = Arc::new(RecordingSink::default());
        let backend = ScriptedBackend::default().fail(BackendError::Status {
            status: 500,
            message: Some("Failed to get response from Gemini".to_string()),
        });
        let (controller, _) = controller(&sink, backend);

        controller.submit("hello").await;

        let errors: Vec<_> = sink
            .messages()
            .into_iter()
            .filter(|m| matches!(m.content, MessageContent::Error { .. }))
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].content, MessageContent::error("Failed to get response from Gemini"));
        assert_eq!(typing_events(&sink), (1, 1));
        assert!(!controller.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_pending_is_rejected() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, backend) = controller(&sink, ScriptedBackend::default().gated("done"));

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("first").await }
        });
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(controller.is_busy());

        assert!(matches!(controller.submit("second").await, SubmitOutcome::Rejected));
        let users: Vec<_> = sink.messages().into_iter().filter(|m| m.origin == Origin::User).collect();
        assert_eq!(users.len(), 1);
        assert_eq!(sink.statuses(), vec![BUSY_NOTICE.to_string()]);

        backend.release.notify_one();
        assert!(matches!(first.await.unwrap(), SubmitOutcome::Completed(_)));
        assert!(!controller.is_busy());
        assert_eq!(backend.prompts(), vec!["first"]);
    }

    #[tokio::test(start_paused = true)]
    async fn busy_until_reply_settles() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, _) = controller(&sink, ScriptedBackend::default().reply("a long-ish reply"));

        let running = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("hi").await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(controller.is_busy());
        assert!(matches!(controller.submit("again").await, SubmitOutcome::Rejected));

        running.await.unwrap();
        assert!(!controller.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submit_releases_guard_and_placeholder() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, _) = controller(&sink, ScriptedBackend::default().gated("never"));

        let running = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("hi").await }
        });
        tokio::time::sleep(Duration::from_millis(1)).await;
        running.abort();
        let _ = running.await;

        assert!(!controller.is_busy());
        assert_eq!(typing_events(&sink), (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_view_stops_running_reveal() {
        let sink = Arc::new(RecordingSink::default());
        let (controller, _) = controller(&sink, ScriptedBackend::default().reply("streaming text here"));

        let running = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("hi").await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(controller.renderer().active_reveals(), 1);

        controller.clear_view();
        running.await.unwrap();

        assert_eq!(controller.renderer().active_reveals(), 0);
        assert!(!sink.events().iter().any(|e| matches!(e, DisplayEvent::Settle { .. })));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn save_media_writes_unique_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(RecordingSink::default());
        let backend = Arc::new(ScriptedBackend::default().media_bytes(Ok(vec![1, 2, 3])));
        let config = RuntimeConfig::new().with_download_dir(dir.path());
        let ctx = AppContext::new(sink.clone(), backend, SessionId::generate(), config);
        let controller = Controller::new(ctx);

        std::fs::write(dir.path().join("cat.png"), b"old").unwrap();
        let path = controller.save_media("https://x/cat.png", "../cat.png").await.unwrap();

        assert_eq!(path, dir.path().join("cat-1.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert!(sink.statuses()[0].starts_with("Saved image to"));
    }

    #[tokio::test]
    async fn save_media_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(RecordingSink::default());
        let backend = Arc::new(ScriptedBackend::default().media_bytes(Err(BackendError::Status {
            status: 404,
            message: None,
        })));
        let config = RuntimeConfig::new().with_download_dir(dir.path());
        let ctx = AppContext::new(sink.clone(), backend, SessionId::generate(), config);

        assert!(Controller::new(ctx).save_media("https://x/gone.png", "gone.png").await.is_err());
        assert!(sink.statuses()[0].starts_with("Couldn't save image"));
    }

    #[test]
    fn unused_path_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("render"), b"").unwrap();
        std::fs::write(dir.path().join("render-1"), b"").unwrap();
        assert_eq!(unused_path(dir.path(), "render"), dir.path().join("render-2"));
        assert_eq!(unused_path(dir.path(), ""), dir.path().join(defaults::MEDIA_FILE_NAME));
    }
}
