//! Everything the controller needs, passed in at construction.

use std::sync::Arc;

use gemi_client::Backend;
use gemi_core::SessionId;

use crate::config::RuntimeConfig;
use crate::sink::DisplaySink;

#[derive(Clone)]
pub struct AppContext {
    pub sink: Arc<dyn DisplaySink>,
    pub backend: Arc<dyn Backend>,
    pub session: SessionId,
    pub config: RuntimeConfig,
}

impl AppContext {
    pub fn new(
        sink: Arc<dyn DisplaySink>,
        backend: Arc<dyn Backend>,
        session: SessionId,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            sink,
            backend,
            session,
            config,
        }
    }
}
