//! Client-generated session identifier, persisted in the config table.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use gemi_constant::defaults::SESSION_ID_KEY;

use crate::db;
use crate::error::{GemiError, Result};

const PREFIX: &str = "session_";

/// `session_<unix millis><5 random digits>`. Sent with every request; never expires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = uuid::Uuid::new_v4().as_u128() % 100_000;
        Self(format!("{PREFIX}{millis}{suffix:05}"))
    }

    /// Accepts any stored id that is non-blank; older clients may have used another shape.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(GemiError::Session("session id is empty".to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stored id, or a fresh one written back on first launch.
    pub fn load_or_create(conn: &rusqlite::Connection) -> Result<Self> {
        if let Some(stored) = db::get_config_value(conn, SESSION_ID_KEY)? {
            match Self::parse(&stored) {
                Ok(id) => return Ok(id),
                Err(e) => tracing::warn!(error = %e, "discarding stored session id"),
            }
        }
        let id = Self::generate();
        db::set_config(conn, SESSION_ID_KEY, id.as_str())?;
        tracing::debug!(session.id = %id, "created session id");
        Ok(id)
    }

    /// Stored id without creating one.
    pub fn load(conn: &rusqlite::Connection) -> Result<Option<Self>> {
        Ok(db::get_config_value(conn, SESSION_ID_KEY)?
            .and_then(|raw| Self::parse(&raw).ok()))
    }

    /// Forget the stored id; the next `load_or_create` makes a new one.
    pub fn reset(conn: &rusqlite::Connection) -> Result<bool> {
        Ok(db::delete_config(conn, SESSION_ID_KEY)?)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
