mod agent;
mod config;
mod conversation;
mod errors;
mod llm_client;
mod routes;
mod session;
mod state;
mod tools;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OllamaBackend;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Counseling Agent v{}", env!("CARGO_PKG_VERSION"));

    // Model handles are built per turn from session settings; this only holds the connection pool.
    let models = OllamaBackend::new(
        config.ollama_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "Ollama backend at {} (default model: {}, temperature: {})",
        config.ollama_url, config.default_model.model, config.default_model.temperature
    );

    let state = AppState {
        config: config.clone(),
        sessions: Arc::new(SessionStore::new(Duration::from_secs(
            config.session_idle_ttl_secs,
        ))),
        models: Arc::new(models),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
