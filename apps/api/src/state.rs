use std::sync::Arc;

use crate::llm_client::ChatModel;
use crate::resume::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-through résumé cache; safe for concurrent readers after warm-up.
    pub resume: Arc<ResumeStore>,
    /// Pluggable chat model. Production: `AnthropicClient`. Tests: mocks.
    pub llm: Arc<dyn ChatModel>,
}
