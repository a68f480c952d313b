use std::sync::Arc;

use crate::analysis::SessionStore;
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. Default: GeminiClient.
    pub model: Arc<dyn GenerativeModel>,
    /// Resume text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Analyses awaiting their single follow-up question.
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}
