use std::sync::Arc;

use crate::config::Config;
use crate::resume::experience::ExperienceExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable experience backend. Default: LlmExperienceExtractor.
    pub experience: Arc<dyn ExperienceExtractor>,
}
