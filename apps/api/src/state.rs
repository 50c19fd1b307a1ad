use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelFactory;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    /// Builds a fresh model handle per turn. Default: `OllamaBackend`.
    pub models: Arc<dyn ModelFactory>,
}
