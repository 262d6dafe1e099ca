//! Main entry point for the ytdlx gateway

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ytdlx_gateway::{api, config::Settings, extractor, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting ytdlx gateway");
    info!(
        "Loaded configuration: server={}:{} probe={}",
        settings.server.host, settings.server.port, settings.extractor.binary
    );

    // Make sure the download directory exists before ServeDir points at it
    tokio::fs::create_dir_all(&settings.storage.base_path).await?;

    let media_extractor =
        extractor::create_extractor(&settings.extractor, &settings.storage.base_path);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let app_state = Arc::new(AppState {
        settings: Arc::new(RwLock::new(settings)),
        extractor: media_extractor,
    });

    // Build the router
    let app = api::routes::create_router(app_state).await;

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
