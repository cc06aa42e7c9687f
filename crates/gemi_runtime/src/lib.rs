//! Request lifecycle and incremental rendering.
//!
//! ```text
//!  UiCommand::Submit ──► Controller ──route──► dyn Backend
//!                           │  typing placeholder shown/removed
//!                           ▼
//!                        Renderer ──tick──► RevealCursor ──► DisplaySink (Reveal…Settle)
//! ```
//!
//! Nothing here touches a terminal: every display change goes through a
//! [`DisplaySink`], so the same controller drives the TUI and `gemi ask`.

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod renderer;
pub mod reveal;
pub mod routing;
pub mod schedule;
pub mod sink;

#[cfg(test)]
mod testing;

pub use config::RuntimeConfig;
pub use context::AppContext;
pub use controller::{Controller, SubmitOutcome};
pub use error::{Result, RuntimeError};
pub use renderer::{Reveal, RevealOutcome, Renderer};
pub use reveal::RevealCursor;
pub use routing::{Route, route};
pub use schedule::RepeatingTask;
pub use sink::{ChannelSink, Delivery, DisplaySink};
