pub mod compress;
pub mod pages;
pub mod response;
pub mod staging;
pub mod upload;

use crate::config::{AppConfig, EncoderConfig, ServerConfig};
use crate::utils::encoder_available;
use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// Shared, read-only state for request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub encoder: EncoderConfig,
    pub server: ServerConfig,
}

impl From<AppConfig> for AppState {
    fn from(config: AppConfig) -> Self {
        Self {
            encoder: config.encoder,
            server: config.server,
        }
    }
}

/// Build the web interface router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.server.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(pages::not_found.into_service());

    Router::new()
        .route("/", get(pages::index).fallback(pages::not_found))
        .route("/index.html", get(pages::index).fallback(pages::not_found))
        .route(
            "/compress",
            post(compress::compress)
                .fallback(pages::not_found)
                // The declared Content-Length is checked by the handler
                .layer(DefaultBodyLimit::disable()),
        )
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web interface until Ctrl+C or SIGTERM
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    if !encoder_available(&config.encoder.program) {
        warn!(
            "{} is not installed or not in PATH; compression requests will fail",
            config.encoder.program
        );
    }

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        addr = %addr,
        static_dir = %config.server.static_dir.display(),
        max_upload_bytes = config.server.max_upload_bytes,
        "Web interface listening"
    );
    println!("\nVideo Compression Web Interface");
    println!("   Open http://localhost:{} in your browser", config.server.port);
    println!("   Press Ctrl+C to stop\n");

    let app = router(Arc::new(AppState::from(config)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("\nShutting down server...");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
