//! iTongQuiz OCR Server
//!
//! Extracts text from uploaded PDFs, falling back to Tesseract OCR for
//! scanned documents.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use itongquiz_ocr_server::config::Config;
use itongquiz_ocr_server::ocr::probe_available;
use itongquiz_ocr_server::routes;
use itongquiz_ocr_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "itongquiz_ocr_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting iTongQuiz OCR Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "OCR: {} (languages {}, psm {}, {} dpi)",
        config.ocr.command,
        config.ocr.languages,
        config.ocr.page_seg_mode.number(),
        config.ocr.dpi
    );

    let app_state = AppState::new(config.clone());

    let engine = app_state.ocr_engine().clone();
    let ocr_ready = tokio::task::spawn_blocking(move || probe_available(engine.as_ref()))
        .await
        .unwrap_or(false);
    if !ocr_ready {
        tracing::warn!("OCR engine not available; scanned PDFs will fail until it is installed");
    }

    let app = routes::router(app_state);

    // Start server with graceful shutdown
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid SERVER_HOST: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("iTongQuiz OCR Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
