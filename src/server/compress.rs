use super::AppState;
use super::response::{CompressionInfo, file_response};
use super::staging::StagingDir;
use super::upload::{boundary, declared_length, read_upload};
use crate::encoder::{self, CompressionSettings, DEFAULT_PRESET};
use crate::error::AppError;
use crate::utils::{ascii_filename, compressed_name};
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// `POST /compress`: compress an uploaded video and send it back
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn compress(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    // Size checks happen before any of the body is read
    let declared = declared_length(request.headers())?;
    let limit = state.server.max_upload_bytes;
    if declared > limit {
        return Err(AppError::PayloadTooLarge { declared, limit });
    }
    boundary(request.headers())?;

    let staging = StagingDir::create(state.server.staging_dir.as_deref())?;

    let multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::Multipart(e.body_text()))?;
    let upload = read_upload(multipart, staging.path()).await?;
    let file = upload.file.ok_or(AppError::NoFile)?;
    debug!("Upload {} staged at {} ({} bytes)", file.name, file.path.display(), file.size);

    let settings = CompressionSettings::resolve(
        upload.preset.as_deref().unwrap_or(DEFAULT_PRESET),
        &upload.overrides,
    );
    let output_name = compressed_name(&file.name);
    let output_path = staging.path().join(&output_name);

    let result = encoder::compress_file(&file.path, &output_path, &settings, &state.encoder).await?;
    let data = tokio::fs::read(&output_path).await?;
    staging.close();

    info!(
        "Sending {} ({} -> {} bytes, {})",
        output_name, result.input_size, result.output_size, result.compression_ratio
    );

    let info = CompressionInfo {
        original_size: result.input_size,
        compressed_size: result.output_size,
        ratio: result.compression_ratio,
    };
    Ok(file_response(data, &ascii_filename(&output_name), &info))
}
