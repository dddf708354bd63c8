use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Message shown to clients for failures whose details stay server-side
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing or invalid Content-Length header")]
    MissingContentLength,

    #[error("File too large: {declared} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { declared: u64, limit: u64 },

    #[error("Missing multipart boundary in Content-Type header")]
    MissingBoundary,

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("No file uploaded")]
    NoFile,

    #[error("Only one file field is allowed")]
    DuplicateFile,

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("{0}")]
    EncoderFailed(String),

    #[error("Encoder did not finish within {}s", .0.as_secs())]
    EncoderTimeout(Duration),

    #[error("Failed to start {program}: {source}")]
    EncoderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::MissingContentLength
            | AppError::MissingBoundary
            | AppError::Multipart(_)
            | AppError::NoFile
            | AppError::DuplicateFile => 400,
            AppError::PayloadTooLarge { .. } => 413,
            _ => 500,
        }
    }

    /// Whether the error was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Text that may be returned to an HTTP client.
    ///
    /// Encoder diagnostics are passed through verbatim; other server-side
    /// failures collapse to [`GENERIC_SERVER_ERROR`].
    pub fn client_message(&self) -> String {
        match self {
            AppError::EncoderFailed(stderr) => stderr.clone(),
            AppError::PayloadTooLarge { .. } => "File too large".to_string(),
            e if e.is_client_error() => e.to_string(),
            _ => GENERIC_SERVER_ERROR.to_string(),
        }
    }
}
