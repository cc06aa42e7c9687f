//! Wire types for the backend proxy.

use serde::{Deserialize, Serialize};

/// Both backend variants are served: one reads `message`, the other `prompt`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    pub reply: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    #[serde(alias = "image")]
    pub image_url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    pub result: Option<String>,
    pub error: Option<String>,
}

/// Failure body: `{error}`, or `{reply}` from the variant that reports errors as replies.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub reply: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.reply).filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Backend mode, e.g. "Gemini + Google Search"
    #[serde(default)]
    pub hybrid: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_carries_both_fields() {
        let body = serde_json::to_value(ChatRequest {
            message: "hi",
            prompt: "hi",
            session_id: Some("session_1"),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message": "hi", "prompt": "hi", "sessionId": "session_1"}));
    }

    #[test]
    fn image_response_accepts_alias() {
        let a: ImageResponse = serde_json::from_str(r#"{"imageUrl":"u1"}"#).unwrap();
        let b: ImageResponse = serde_json::from_str(r#"{"image":"u2"}"#).unwrap();
        assert_eq!(a.image_url.as_deref(), Some("u1"));
        assert_eq!(b.image_url.as_deref(), Some("u2"));
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"e","reply":"r"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("e"));
        let body: ErrorBody = serde_json::from_str(r#"{"reply":"  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
