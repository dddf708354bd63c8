//! Decoding of the `/compress` form upload

use crate::encoder::settings::{accept_crf, accept_fps, accept_scale};
use crate::encoder::{Codec, Overrides, Preset};
use crate::error::AppError;
use crate::utils::sanitize_filename;
use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use axum::http::{HeaderMap, header};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// An uploaded file already written to the staging directory
#[derive(Debug)]
pub struct StagedFile {
    /// Sanitized filename
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Decoded form fields of one upload
#[derive(Debug, Default)]
pub struct UploadFields {
    pub file: Option<StagedFile>,
    pub preset: Option<String>,
    pub overrides: Overrides,
}

/// Read the declared body size, rejecting requests without a usable Content-Length
pub fn declared_length(headers: &HeaderMap) -> Result<u64, AppError> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or(AppError::MissingContentLength)
}

/// Extract the multipart boundary, without surrounding quotes
pub fn boundary(headers: &HeaderMap) -> Result<String, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingBoundary)?;

    let (_, rest) = content_type
        .split_once("boundary=")
        .ok_or(AppError::MissingBoundary)?;
    let value = rest.split(';').next().unwrap_or_default().trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    if value.is_empty() {
        return Err(AppError::MissingBoundary);
    }
    Ok(value.to_string())
}

fn multipart_error(e: MultipartError) -> AppError {
    AppError::Multipart(e.body_text())
}

/// Read every form field, streaming the `file` field into `staging`
pub async fn read_upload(mut multipart: Multipart, staging: &Path) -> Result<UploadFields, AppError> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                if let Some(staged) = stage_file(field, staging, fields.file.is_some()).await? {
                    fields.file = Some(staged);
                }
            }
            "preset" => {
                let value = field_text(field).await?;
                if Preset::find(&value).is_none() {
                    warn!("Unknown preset '{}', using medium", value);
                }
                fields.preset = Some(value);
            }
            "crf" => {
                let value = field_text(field).await?;
                fields.overrides.crf = parse_number("crf", &value).filter(|&crf| {
                    let ok = accept_crf(crf).is_some();
                    if !ok {
                        warn!("Ignoring out-of-range crf {}", crf);
                    }
                    ok
                });
            }
            "scale" => {
                let value = field_text(field).await?;
                if accept_scale(&value) {
                    fields.overrides.scale = Some(value);
                } else if !value.is_empty() && value != "none" {
                    warn!("Ignoring invalid scale '{}'", value);
                }
            }
            "fps" => {
                let value = field_text(field).await?;
                fields.overrides.fps = parse_number("fps", &value).filter(|&fps| {
                    let ok = accept_fps(fps).is_some();
                    if !ok {
                        warn!("Ignoring out-of-range fps {}", fps);
                    }
                    ok
                });
            }
            "codec" => {
                let value = field_text(field).await?;
                if !Codec::is_known(&value) {
                    warn!("Unknown codec '{}', using h264", value);
                }
                fields.overrides.codec = Some(value);
            }
            other => debug!("Ignoring unknown form field '{}'", other),
        }
    }

    Ok(fields)
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    let text = field.text().await.map_err(multipart_error)?;
    Ok(text.trim_matches(['\r', '\n']).to_string())
}

fn parse_number(field: &str, value: &str) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            if !value.is_empty() {
                warn!("Ignoring non-numeric {} '{}'", field, value);
            }
            None
        }
    }
}

/// Write a file field to disk. Parts without a filename or payload are skipped.
async fn stage_file(
    mut field: Field<'_>,
    staging: &Path,
    already_staged: bool,
) -> Result<Option<StagedFile>, AppError> {
    let Some(original) = field
        .file_name()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
    else {
        warn!("File field without a filename, skipping");
        return Ok(None);
    };
    if already_staged {
        return Err(AppError::DuplicateFile);
    }

    let name = sanitize_filename(&original);
    if name != original {
        info!("Sanitized upload filename {:?} -> {:?}", original, name);
    }

    let path = staging.join(&name);
    let mut file = tokio::fs::File::create(&path).await?;
    let mut size = 0u64;
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        file.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    if size == 0 {
        warn!("Uploaded file {:?} is empty, skipping", name);
        tokio::fs::remove_file(&path).await?;
        return Ok(None);
    }

    info!("Staged upload {} ({} bytes)", name, size);
    Ok(Some(StagedFile { name, path, size }))
}
