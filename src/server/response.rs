use crate::error::AppError;
use axum::{
    Json,
    body::Body,
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Custom header carrying size metadata for a compressed download
pub const COMPRESSION_INFO_HEADER: HeaderName = HeaderName::from_static("x-compression-info");

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Size metadata sent alongside a compressed file
#[derive(Debug, Serialize)]
pub struct CompressionInfo {
    pub original_size: u64,
    pub compressed_size: u64,
    pub ratio: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self {
            AppError::EncoderFailed(_) => tracing::error!("Compression failed: {}", self),
            e if e.is_client_error() => tracing::warn!("Rejected request: {}", e),
            e => tracing::error!(error = ?e, "Internal error: {}", e),
        }

        let body = Json(ErrorResponse {
            error: self.client_message(),
        });
        (status, body).into_response()
    }
}

/// Build the download response for a compressed file
pub fn file_response(data: Vec<u8>, ascii_name: &str, info: &CompressionInfo) -> Response {
    let info_json = serde_json::to_string(info).unwrap_or_default();

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ascii_name),
            ),
            (header::CONTENT_LENGTH, data.len().to_string()),
            (COMPRESSION_INFO_HEADER, info_json),
        ],
        Body::from(data),
    )
        .into_response()
}
