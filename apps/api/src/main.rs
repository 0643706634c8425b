mod config;
mod errors;
mod export;
mod generation;
mod layout;
mod llm_client;
mod markdown;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::GenerationGate;
use crate::layout::default_page_config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileSlotStore, SlotStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Plansmith API v{}", env!("CARGO_PKG_VERSION"));

    // Open the persisted plan slot and restore the last plan if present
    let store = FileSlotStore::open(&config.plan_store_path)?;
    let store: Arc<dyn SlotStore> = Arc::new(store);
    if store.get().await.is_some() {
        info!("Plan slot restored from {}", config.plan_store_path.display());
    }

    // Initialize LLM client
    let llm = GeminiClient::with_base_url(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Layout page config: A4, Helvetica 12pt body, 180mm measure
    let page_config = default_page_config();
    info!(
        "Layout page config: {}pt body on {}x{}mm",
        page_config.body_size_pt, page_config.page_width_mm, page_config.page_height_mm
    );

    // Build app state
    let state = AppState {
        llm,
        store,
        gate: Arc::new(GenerationGate::new()),
        config: config.clone(),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
