pub mod db;
pub mod error;
pub mod event;
pub mod exchange;
pub mod markup;
pub mod message;
pub mod session;

pub use error::{GemiError, Result};
pub use event::{DisplayEvent, UiCommand};
pub use exchange::{EndpointKind, Exchange, Outcome};
pub use markup::{Markup, MarkupRule, RegexRule, Segment, Translator, translate};
pub use message::{MediaAttachment, Message, MessageContent, MessageId, Origin, RenderStage};
pub use session::SessionId;
