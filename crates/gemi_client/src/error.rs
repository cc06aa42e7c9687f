use gemi_constant::defaults;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout, interrupted body
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status; `message` is the body's `error` (or `reply`) text when present
    #[error("backend returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    /// 2xx response carrying an `error` field
    #[error("backend error: {0}")]
    Remote(String),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

impl BackendError {
    /// Text shown in the chat for this failure.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Transport(_) | BackendError::Decode(_) => defaults::CONNECT_ERROR_TEXT.to_string(),
            BackendError::Remote(message)
            | BackendError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            BackendError::Status { message: None, .. }
            | BackendError::MissingField(_)
            | BackendError::Config(_) => defaults::REMOTE_ERROR_FALLBACK_TEXT.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_) | BackendError::Decode(_))
    }
}
