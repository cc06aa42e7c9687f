use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which backend collaborator a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Chat,
    Image,
    Search,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Chat => "chat",
            EndpointKind::Image => "image",
            EndpointKind::Search => "search",
        }
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Pending,
    Success,
    Failure { error: String },
}

/// One request/response cycle. At most one is pending at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: Uuid,
    /// Text exactly as the user submitted it
    pub request_text: String,
    pub endpoint: EndpointKind,
    /// What is forwarded to the endpoint after routing
    pub prompt: String,
    pub started_at: DateTime<Utc>,
    pub outcome: Outcome,
}

impl Exchange {
    pub fn new(request_text: impl Into<String>, endpoint: EndpointKind, prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_text: request_text.into(),
            endpoint,
            prompt: prompt.into(),
            started_at: Utc::now(),
            outcome: Outcome::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == Outcome::Pending
    }

    /// Outcomes are final; a second call keeps the first outcome.
    pub fn succeed(&mut self) {
        if self.is_pending() {
            self.outcome = Outcome::Success;
        }
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        if self.is_pending() {
            self.outcome = Outcome::Failure {
                error: error.into(),
            };
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}
