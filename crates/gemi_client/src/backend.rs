use async_trait::async_trait;
use gemi_core::{EndpointKind, SessionId};

use crate::error::Result;
use crate::types::HealthStatus;

/// Successful result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// URL of a generated image
    Media(String),
}

/// The remote collaborator. Implemented over HTTP by [`crate::HttpBackend`]; tests supply fakes.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn chat(&self, prompt: &str, session: Option<&SessionId>) -> Result<String>;

    /// Returns the generated image URL.
    async fn image(&self, prompt: &str, session: Option<&SessionId>) -> Result<String>;

    async fn search(&self, query: &str, session: Option<&SessionId>) -> Result<String>;

    async fn health(&self) -> Result<HealthStatus>;

    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>>;

    /// Dispatch to the endpoint the request was routed to.
    async fn send(&self, endpoint: EndpointKind, prompt: &str, session: Option<&SessionId>) -> Result<Reply> {
        match endpoint {
            EndpointKind::Chat => self.chat(prompt, session).await.map(Reply::Text),
            EndpointKind::Image => self.image(prompt, session).await.map(Reply::Media),
            EndpointKind::Search => self.search(prompt, session).await.map(Reply::Text),
        }
    }
}
