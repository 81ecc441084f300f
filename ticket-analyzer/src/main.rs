//! ticket-analyzer - Ticket audio analysis service
//!
//! Accepts an uploaded support-call recording, transcribes it, normalizes
//! Hindi transcripts, scores sentiment and churn risk, and posts a
//! formatted note to the matching Freshdesk ticket.
//!
//! Transcription, translation, and sentiment are delegated to external
//! inference endpoints; this binary is the glue and the web UI.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ticket_analyzer::config::AnalyzerConfig;
use ticket_analyzer::services::{
    AnalysisPipeline, FreshdeskClient, HfSentimentClient, LibreTranslateClient, WhisperApiClient,
};
use ticket_analyzer::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ticket-analyzer");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve configuration (ENV -> TOML -> defaults)
    let config = AnalyzerConfig::resolve();
    info!("Freshdesk tenant: {}", config.freshdesk_domain);
    info!("Transcription endpoint: {}", config.transcription_url);

    // Construct the external capability adapters; each is an injected
    // handle on the shared pipeline rather than a global singleton
    let transcriber = Arc::new(WhisperApiClient::new(config.transcription_url.clone()));
    let translator = Arc::new(LibreTranslateClient::new(config.translation_url.clone()));
    let sentiment = Arc::new(HfSentimentClient::new(config.sentiment_url.clone()));
    let notifier = Arc::new(FreshdeskClient::new(
        config.freshdesk_base_url(),
        config.freshdesk_api_key.clone(),
    ));

    let pipeline = Arc::new(AnalysisPipeline::new(
        transcriber,
        translator,
        sentiment,
        notifier,
    ));
    let state = AppState::new(pipeline);

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("127.0.0.1:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
