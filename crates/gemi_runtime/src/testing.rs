//! In-memory sink and scripted backend for runtime tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use gemi_client::{Backend, BackendError, HealthStatus};
use gemi_core::{DisplayEvent, Markup, Message, MessageContent, MessageId, RenderStage, SessionId};

use crate::sink::{Delivery, DisplaySink};

/// Keeps a live display list and a log of every accepted event.
#[derive(Default)]
pub struct RecordingSink {
    inner: Mutex<Recorded>,
}

#[derive(Default)]
struct Recorded {
    messages: Vec<Message>,
    events: Vec<DisplayEvent>,
    detached: bool,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().unwrap().messages.clone()
    }

    pub fn events(&self) -> Vec<DisplayEvent> {
        self.inner.lock().unwrap().events.clone()
    }

    /// Drop one message as a user clearing it would.
    pub fn drop_message(&self, id: MessageId) {
        self.inner.lock().unwrap().messages.retain(|m| m.id != id);
    }

    /// Every later write is detached.
    pub fn detach(&self) {
        self.inner.lock().unwrap().detached = true;
    }

    pub fn reveal_updates(&self, id: MessageId) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Reveal { id: target, visible } if target == id => Some(visible),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Status { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySink for RecordingSink {
    fn emit(&self, event: DisplayEvent) -> Delivery {
        let mut inner = self.inner.lock().unwrap();
        if inner.detached {
            return Delivery::Detached;
        }
        let delivery = match &event {
            DisplayEvent::Show { message } => {
                inner.messages.push(message.clone());
                Delivery::Delivered
            }
            DisplayEvent::Reveal { id, visible } => match inner.messages.iter_mut().find(|m| m.id == *id) {
                Some(message) => {
                    message.content = MessageContent::text(visible.clone());
                    Delivery::Delivered
                }
                None => Delivery::Detached,
            },
            DisplayEvent::Settle { id, markup } => match inner.messages.iter_mut().find(|m| m.id == *id) {
                Some(message) => {
                    message.content = MessageContent::Markup {
                        markup: markup.clone(),
                    };
                    message.stage = RenderStage::Settled;
                    Delivery::Delivered
                }
                None => Delivery::Detached,
            },
            DisplayEvent::Remove { id } => {
                let before = inner.messages.len();
                inner.messages.retain(|m| m.id != *id);
                if inner.messages.len() < before {
                    Delivery::Delivered
                } else {
                    Delivery::Detached
                }
            }
            _ => Delivery::Delivered,
        };
        inner.events.push(event);
        delivery
    }
}

pub fn settled_markup(message: &Message) -> Option<&Markup> {
    match &message.content {
        MessageContent::Markup { markup } => Some(markup),
        _ => None,
    }
}

pub enum Scripted {
    Reply(Result<String, BackendError>),
    /// Wait for `release` before answering
    Gated(Result<String, BackendError>),
}

/// Answers chat, search and image calls from a queue, recording each prompt.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Scripted>>,
    prompts: Mutex<Vec<String>>,
    media: Mutex<Option<Result<Vec<u8>, BackendError>>>,
    pub release: Notify,
}

impl ScriptedBackend {
    pub fn reply(self, text: &str) -> Self {
        self.push(Scripted::Reply(Ok(text.to_string())))
    }

    pub fn fail(self, error: BackendError) -> Self {
        self.push(Scripted::Reply(Err(error)))
    }

    pub fn gated(self, text: &str) -> Self {
        self.push(Scripted::Gated(Ok(text.to_string())))
    }

    pub fn media_bytes(self, bytes: Result<Vec<u8>, BackendError>) -> Self {
        *self.media.lock().unwrap() = Some(bytes);
        self
    }

    fn push(self, scripted: Scripted) -> Self {
        self.replies.lock().unwrap().push_back(scripted);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    async fn next(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let scripted = self.replies.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Reply(result)) => result,
            Some(Scripted::Gated(result)) => {
                self.release.notified().await;
                result
            }
            None => Err(BackendError::MissingField("reply")),
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn chat(&self, prompt: &str, _session: Option<&SessionId>) -> Result<String, BackendError> {
        self.next(prompt).await
    }

    async fn image(&self, prompt: &str, _session: Option<&SessionId>) -> Result<String, BackendError> {
        self.next(prompt).await
    }

    async fn search(&self, query: &str, _session: Option<&SessionId>) -> Result<String, BackendError> {
        self.next(query).await
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus {
            status: "OK".to_string(),
            hybrid: None,
        })
    }

    async fn fetch_media(&self, _url: &str) -> Result<Vec<u8>, BackendError> {
        self.media
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(BackendError::MissingField("media")))
    }
}
