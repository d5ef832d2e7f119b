use std::sync::Arc;

use crate::config::Config;
use crate::interview::orchestrator::SimulationSettings;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion backend. `LlmClient` in production.
    pub llm: Arc<dyn ChatCompletion>,
    pub config: Config,
    /// Template for every run started over HTTP; the request overrides the question count.
    pub settings: SimulationSettings,
}
