use super::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::warn;

/// Served when the configured index page is missing
pub const FALLBACK_INDEX: &str = "<html><body><h1>index.html not found</h1></body></html>";

/// `GET /` and `GET /index.html`
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.server.index_path();
    let body = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to read {}: {}", path.display(), e);
            }
            FALLBACK_INDEX.as_bytes().to_vec()
        }
    };

    ([(header::CONTENT_TYPE, "text/html")], body).into_response()
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
