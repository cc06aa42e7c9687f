use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemi_constant::defaults;

use crate::markup::Markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    User,
    Assistant,
}

/// Pending: placeholder or not yet revealed. Revealing: visible prefix grows.
/// Settled: terminal, content no longer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    Pending,
    Revealing,
    Settled,
}

/// Generated image shown inline with a download affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub caption: String,
    pub url: String,
    pub file_name: String,
}

impl MediaAttachment {
    /// Uses the last path segment of `url` as the file name when it looks like one.
    pub fn new(caption: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let file_name = file_name_from_url(&url).unwrap_or_else(|| defaults::MEDIA_FILE_NAME.to_string());
        Self {
            caption: caption.into(),
            url,
            file_name,
        }
    }
}

fn file_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let without_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
    let (_, tail) = without_scheme.rsplit_once('/')?;
    let ext_ok = tail
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty() && ext.len() <= 5);
    let safe = tail
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    (ext_ok && safe).then(|| tail.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    /// Plain text; for a revealing message this is the visible prefix.
    Text { text: String },
    Markup { markup: Markup },
    Media { media: MediaAttachment },
    /// Animated "assistant is typing" marker; carries no text.
    Typing,
    Error { error: String },
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text { text: text.into() }
    }

    pub fn error(error: impl Into<String>) -> Self {
        MessageContent::Error {
            error: error.into(),
        }
    }

    /// Text a user would copy out of this content.
    pub fn plain_text(&self) -> String {
        match self {
            MessageContent::Text { text } => text.clone(),
            MessageContent::Markup { markup } => markup.plain_text(),
            MessageContent::Media { media } => media.url.clone(),
            MessageContent::Typing => String::new(),
            MessageContent::Error { error } => error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub origin: Origin,
    pub content: MessageContent,
    pub stage: RenderStage,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(origin: Origin, content: MessageContent, stage: RenderStage) -> Self {
        Self {
            id: MessageId::new(),
            origin,
            content,
            stage,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, MessageContent::text(text), RenderStage::Settled)
    }

    pub fn typing() -> Self {
        Self::new(Origin::Assistant, MessageContent::Typing, RenderStage::Pending)
    }

    /// Assistant message about to be revealed; starts with an empty visible prefix.
    pub fn revealing() -> Self {
        Self::new(Origin::Assistant, MessageContent::text(""), RenderStage::Revealing)
    }

    pub fn media(media: MediaAttachment) -> Self {
        Self::new(Origin::Assistant, MessageContent::Media { media }, RenderStage::Settled)
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::new(Origin::Assistant, MessageContent::error(error), RenderStage::Settled)
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.content, MessageContent::Typing)
    }

    pub fn is_settled(&self) -> bool {
        self.stage == RenderStage::Settled
    }
}
