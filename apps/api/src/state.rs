use std::sync::Arc;

use crate::generation::session::GenerationSession;
use crate::llm_client::GenerativeBackend;
use crate::render::PosterComposer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generative backend. Default: GeminiClient.
    pub backend: Arc<dyn GenerativeBackend>,
    /// The single UI session's generation state.
    pub session: Arc<GenerationSession>,
    pub composer: Arc<PosterComposer>,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerativeBackend>, composer: PosterComposer) -> Self {
        Self {
            backend,
            session: Arc::new(GenerationSession::new()),
            composer: Arc::new(composer),
        }
    }
}
