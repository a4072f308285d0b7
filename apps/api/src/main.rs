mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::advisor::{Advisor, KeywordAdvisor, LlmAdvisor};
use crate::analysis::keywords::{KeywordExtractor, STOP_WORDS};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let extractor = Arc::new(KeywordExtractor::new(STOP_WORDS));
    info!(
        "Keyword extractor ready (default cap: {})",
        config.max_keywords
    );

    // Advisor: LLM when a key is configured, deterministic otherwise
    let advisor: Arc<dyn Advisor> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM advisor enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmAdvisor(llm))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; using keyword advisor");
            Arc::new(KeywordAdvisor)
        }
    };

    info!("Default report path: {}", config.report_path.display());

    let state = AppState {
        config: config.clone(),
        extractor,
        advisor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
