use std::sync::Arc;

use crate::analysis::advisor::Advisor;
use crate::analysis::keywords::KeywordExtractor;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable; built once with the fixed stop-word table.
    pub extractor: Arc<KeywordExtractor>,
    /// Pluggable advisor. Default: KeywordAdvisor. LlmAdvisor when ANTHROPIC_API_KEY is set.
    pub advisor: Arc<dyn Advisor>,
}
