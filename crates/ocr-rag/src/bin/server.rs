//! OCR RAG server binary
//!
//! Run with: cargo run -p ocr-rag --bin ocr-rag-server

use ocr_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocr_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional TOML file path as the first argument, environment on top
    let config = match std::env::args().nth(1) {
        Some(path) => RagConfig::from_file(&path)?,
        None => RagConfig::default(),
    }
    .with_env_overrides();

    tracing::info!("Configuration loaded");
    tracing::info!("  - OCR model: {}", config.ocr.model);
    tracing::info!(
        "  - Embedding model: {} ({} dimensions)",
        config.embedding.model,
        config.embedding.dimensions
    );
    tracing::info!(
        "  - Vector store: {}:{} collection={}",
        config.store.host,
        config.store.port,
        config.store.collection
    );

    let server = RagServer::new(config).await;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  GET  /            - Health check");
    println!("  POST /parse       - Extract text from a file URL");
    println!("  POST /ingest/file - Extract and index a file URL");
    println!("  POST /query       - Search indexed documents");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
