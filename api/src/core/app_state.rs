use std::sync::Arc;

use answer_engine::AnswerEngine;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Corpus, encoder and generator built once at startup.
    pub engine: Arc<AnswerEngine>,
}

impl AppState {
    pub fn new(engine: Arc<AnswerEngine>) -> Self {
        Self { engine }
    }
}
