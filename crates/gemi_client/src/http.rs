//! reqwest implementation of [`Backend`].

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use gemi_core::{EndpointKind, SessionId};
use gemi_observability::{http_request_span, record_duration};

use crate::backend::Backend;
use crate::config::BackendConfig;
use crate::error::{BackendError, Result};
use crate::types::{
    ChatRequest, ChatResponse, ErrorBody, HealthStatus, ImageRequest, ImageResponse, SearchRequest,
    SearchResponse,
};

pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("gemi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(BackendConfig::from_env()?)
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, endpoint: EndpointKind, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        let span = http_request_span!("POST", url);
        async {
            let started = Instant::now();
            let response = self.client.post(&url).json(body).send().await?;
            let parsed = read_json(response).await;
            record_duration("duration_ms", started.elapsed());
            parsed
        }
        .instrument(span)
        .await
    }
}

/// Status check, then decode. Non-2xx bodies are searched for an error message.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    tracing::Span::current().record("http.status_code", status.as_u16());
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(ErrorBody::into_message);
        tracing::warn!(status = status.as_u16(), has_message = message.is_some(), "backend request failed");
        return Err(BackendError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

/// `error` wins over the success field; a blank success field counts as missing.
fn take_field(value: Option<String>, error: Option<String>, field: &'static str) -> Result<String> {
    if let Some(error) = error.filter(|e| !e.trim().is_empty()) {
        return Err(BackendError::Remote(error));
    }
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(BackendError::MissingField(field))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, prompt: &str, session: Option<&SessionId>) -> Result<String> {
        let body = ChatRequest {
            message: prompt,
            prompt,
            session_id: session.map(SessionId::as_str),
        };
        let response: ChatResponse = self.post_json(EndpointKind::Chat, &body).await?;
        take_field(response.reply, response.error, "reply")
    }

    async fn image(&self, prompt: &str, session: Option<&SessionId>) -> Result<String> {
        let body = ImageRequest {
            prompt,
            session_id: session.map(SessionId::as_str),
        };
        let response: ImageResponse = self.post_json(EndpointKind::Image, &body).await?;
        take_field(response.image_url, response.error, "imageUrl")
    }

    async fn search(&self, query: &str, session: Option<&SessionId>) -> Result<String> {
        let body = SearchRequest {
            query,
            session_id: session.map(SessionId::as_str),
        };
        let response: SearchResponse = self.post_json(EndpointKind::Search, &body).await?;
        take_field(response.result, response.error, "result")
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.config.health_url();
        let span = http_request_span!("GET", url);
        async {
            let response = self.client.get(&url).send().await?;
            read_json(response).await
        }
        .instrument(span)
        .await
    }

    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.config.resolve_media_url(url)?;
        let span = http_request_span!("GET", url);
        async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());
            if !status.is_success() {
                return Err(BackendError::Status {
                    status: status.as_u16(),
                    message: None,
                });
            }
            Ok(response.bytes().await?.to_vec())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_field_prefers_error() {
        let err = take_field(Some("x".into()), Some("bad".into()), "reply").unwrap_err();
        assert!(matches!(err, BackendError::Remote(ref m) if m == "bad"));
    }

    #[test]
    fn take_field_blank_is_missing() {
        let err = take_field(Some("   ".into()), None, "reply").unwrap_err();
        assert!(matches!(err, BackendError::MissingField("reply")));
        assert_eq!(take_field(Some("ok".into()), Some("".into()), "reply").unwrap(), "ok");
    }
}
