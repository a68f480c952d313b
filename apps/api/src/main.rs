mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;
mod ui;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::SessionStore;
use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::{GeminiClient, GenerativeModel};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generation client
    let gemini = GeminiClient::from_config(&config).context("Failed to build Gemini client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        gemini.model_name(),
        config.llm_timeout_secs
    );

    let sessions = Arc::new(SessionStore::new(config.session_ttl_secs));
    info!(
        "Session store initialized (ttl: {}s), UI theme: {}",
        config.session_ttl_secs, config.ui_theme
    );

    // Build app state
    let state = AppState {
        model: Arc::new(gemini),
        extractor: Arc::new(PdfTextExtractor),
        sessions,
        config: config.clone(),
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
