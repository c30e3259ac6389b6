use std::sync::Arc;

use crate::analytics::EventSink;
use crate::llm_client::CompletionProvider;
use crate::store::GenerationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// LLM gateway. Production: `LlmClient`; tests swap in a scripted provider.
    pub llm: Arc<dyn CompletionProvider>,
    pub store: Arc<dyn GenerationStore>,
    pub events: Arc<dyn EventSink>,
}
