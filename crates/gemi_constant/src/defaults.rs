//! Default values used when neither the config table nor the environment sets a key.

/// Backend proxy base; endpoints hang off it as `/chat`, `/image`, `/search`, `/health`.
pub const API_BASE_URL: &str = "http://127.0.0.1:5000/api";

pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Delay between two reveal steps
pub const REVEAL_TICK_MS: u64 = 35;
pub const REVEAL_TICK_MIN_MS: u64 = 10;
pub const REVEAL_TICK_MAX_MS: u64 = 250;

/// Shown for transport failures and undecodable responses
pub const CONNECT_ERROR_TEXT: &str = "Sorry, I couldn't connect. Please try again.";
/// Shown when the backend fails without saying why
pub const REMOTE_ERROR_FALLBACK_TEXT: &str = "The assistant couldn't answer right now. Please try again.";

/// Caption above a generated image
pub const IMAGE_CAPTION: &str = "Here's your generated image:";
/// File name offered when the media URL has no usable last segment
pub const MEDIA_FILE_NAME: &str = "generated-image.png";

/// Config table key holding the persisted session identifier
pub const SESSION_ID_KEY: &str = "session_id";
