mod config;
mod errors;
mod faces;
mod layout;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::faces::loader::HttpImageSource;
use crate::faces::DetectorContext;
use crate::layout::sizing::TieredSizing;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Photobook API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the image fetcher and face detector
    let source = HttpImageSource::new(Duration::from_secs(config.fetch_timeout_secs))
        .context("Failed to build HTTP client for image fetching")?;
    let detector = DetectorContext::new(
        config.models_dir.clone(),
        config.detector_tuning(),
        config.detection_concurrency,
        Arc::new(source),
    );
    // A missing model is not fatal: layouts run without face constraints.
    let models_ready = detector.initialize().await;
    info!(models_ready, "Face detector initialized");

    let layout_options = config.layout_options();
    info!(
        "Layout defaults: overlap {:?}, cell size {}",
        layout_options.overlap, layout_options.cell_size
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        detector: Arc::new(detector),
        sizing: Arc::new(TieredSizing::default()),
        layout_options,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the editor origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
