pub mod command_builder;
pub mod ffmpeg;
pub mod presets;
pub mod settings;

pub use command_builder::build_ffmpeg_args;
pub use ffmpeg::run_encoder;
pub use presets::{DEFAULT_PRESET, PRESETS, Preset};
pub use settings::{Codec, CompressionSettings, Overrides};

use crate::config::EncoderConfig;
use crate::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a successful compression
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub output_file: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
    /// Size reduction formatted as `"63.4%"`
    pub compression_ratio: String,
    pub settings: CompressionSettings,
}

/// Percentage by which `output_size` is smaller than `input_size`
pub fn reduction_percent(input_size: u64, output_size: u64) -> f64 {
    if input_size == 0 {
        return 0.0;
    }
    (1.0 - output_size as f64 / input_size as f64) * 100.0
}

/// Format a reduction to one decimal place, e.g. `"63.4%"`
pub fn format_ratio(input_size: u64, output_size: u64) -> String {
    format!("{:.1}%", reduction_percent(input_size, output_size))
}

/// Default output path for command-line use: `<stem>_compressed.<ext>` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_compressed.{}", stem, ext.to_string_lossy()),
        None => format!("{}_compressed", stem),
    };
    input.with_file_name(name)
}

/// Compress `input` into `output` and report the size change
pub async fn compress_file(
    input: &Path,
    output: &Path,
    settings: &CompressionSettings,
    config: &EncoderConfig,
) -> Result<CompressionResult, AppError> {
    let input_size = match tokio::fs::metadata(input).await {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::InputNotFound(input.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "Compressing {} -> {} (preset={}, crf={}, speed={}, codec={})",
        input.display(),
        output.display(),
        settings.preset,
        settings.crf,
        settings.speed,
        settings.codec
    );

    let args = build_ffmpeg_args(settings, input, output, config);
    run_encoder(&args, config).await?;

    let output_size = tokio::fs::metadata(output).await?.len();
    let compression_ratio = format_ratio(input_size, output_size);
    info!(
        "Compressed {} bytes -> {} bytes ({})",
        input_size, output_size, compression_ratio
    );

    Ok(CompressionResult {
        output_file: output.to_path_buf(),
        input_size,
        output_size,
        compression_ratio,
        settings: settings.clone(),
    })
}
