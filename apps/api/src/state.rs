use std::sync::Arc;

use crate::llm_client::InferenceBackend;

/// Shared application state injected into all route handlers via Axum
/// extractors. The inference backend is the only cross-request resource and
/// is read-only; nothing else is shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable inference backend. Production wires `GeminiClient`; tests
    /// substitute a fake.
    pub llm: Arc<dyn InferenceBackend>,
}
