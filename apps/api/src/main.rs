mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::PosterFonts;
use crate::llm_client::GeminiClient;
use crate::render::PosterComposer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Kronikar API v{}", env!("CARGO_PKG_VERSION"));

    // Poster fonts: embedded DejaVu faces unless overridden; a bad override is fatal
    let fonts = PosterFonts::load(
        config.title_font_path.as_deref(),
        config.body_font_path.as_deref(),
    )?;
    info!(
        title = config.title_font_path.as_deref().unwrap_or("embedded"),
        body = config.body_font_path.as_deref().unwrap_or("embedded"),
        "Poster fonts loaded"
    );

    // Initialize generative backend
    let client = GeminiClient::new(config.api_key.clone(), &config.api_base)?;
    info!(
        "Gemini client initialized (text: {}, image: {})",
        llm_client::TEXT_MODEL,
        llm_client::IMAGE_MODEL
    );

    let state = AppState::new(Arc::new(client), PosterComposer::new(fonts));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
