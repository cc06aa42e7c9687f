//! gemi_client: the backend collaborator behind every exchange.
//!
//! ```text
//!   Controller ──► dyn Backend ──► HttpBackend ──► POST {base}/chat   {message, prompt, sessionId} → {reply}
//!                                              ├─► POST {base}/image  {prompt, sessionId}          → {imageUrl}
//!                                              ├─► POST {base}/search {query, sessionId}           → {result}
//!                                              └─► GET  {base}/health                              → {status, hybrid}
//! ```
//!
//! Any non-2xx status, `error` field, or missing success field is a failure;
//! [`BackendError::user_message`] picks the text shown to the user.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

#[cfg(test)]
mod tests;

pub use backend::{Backend, Reply};
pub use config::BackendConfig;
pub use error::{BackendError, Result};
pub use http::HttpBackend;
pub use types::HealthStatus;
