use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::GenerationGate;
use crate::layout::PageConfig;
use crate::llm_client::GeminiClient;
use crate::store::SlotStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    /// Pluggable single-slot plan store. Default: FileSlotStore.
    pub store: Arc<dyn SlotStore>,
    /// Single-flight gate + epoch guard for the generation pipeline.
    pub gate: Arc<GenerationGate>,
    pub config: Config,
    /// Layout page config — font sizes, margins, and break thresholds for
    /// the export pipeline.
    pub page_config: PageConfig,
}
