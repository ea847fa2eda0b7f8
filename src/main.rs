//! Ollama OpenAI Bridge - main entry point.
//!
//! This binary creates and runs the HTTP server with all bridge routes.

use anyhow::{Context, Result};
use ollama_openai_bridge::{
    core::{AppConfig, OwnershipTable},
    router, AppState, OllamaGateway,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    // Initialize logging. Noise-suppression filters for hyper/reqwest are
    // always appended so a plain RUST_LOG=info does not let chunked-header
    // trace logs through.
    let base_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,ollama_openai_bridge=debug".to_string());
    let filter_str = format!("{},hyper=warn,h2=warn,reqwest=warn", base_filter);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter_str))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let http_client = create_http_client(&config);
    let gateway = OllamaGateway::new(http_client, config.upstream_base_url.clone());
    let state = Arc::new(AppState::new(gateway, OwnershipTable::builtin()));

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!("Starting Ollama OpenAI Bridge on {}", addr);
    tracing::info!("OpenAI API: /v1/chat/completions, /v1/completions, /v1/models");
    tracing::info!("Upstream Ollama server: {}", config.upstream_base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the shared HTTP client with connection pooling.
fn create_http_client(config: &AppConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .pool_max_idle_per_host(20)
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .build()
        .expect("Failed to build HTTP client")
}
