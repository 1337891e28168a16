mod config;
mod errors;
mod gemini;
mod generation;
mod models;
mod routes;
mod session;
mod state;
mod timeline;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;
use crate::timeline::store::TimelineStore;

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

    info!("Starting ContextResume API v{}", env!("CARGO_PKG_VERSION"));

    // The Gemini client is the only component that touches the network
    let generator = Arc::new(GeminiClient::from_config(&config));
    info!("Gemini client initialized (endpoint: {})", config.gemini_api_url);

    // Build app state: one blank timeline entry, an idle session
    let state = AppState {
        timeline: Arc::new(RwLock::new(TimelineStore::default())),
        session: Arc::new(RwLock::new(Session::default())),
        generator,
    };

    // Build router; CORS stays permissive because the form runs in a browser
    // on a separate origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
