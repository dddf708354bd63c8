use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest upload the web interface accepts (4 GiB)
pub const MAX_UPLOAD_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// External encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Encoder executable name or path
    pub program: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    /// Kill the encoder after this many seconds (unset = wait forever)
    pub timeout_secs: Option<u64>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "128k".to_string(),
            timeout_secs: None,
        }
    }
}

/// Web interface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Directory served for GET requests
    pub static_dir: PathBuf,
    /// Page served at `/` and `/index.html`, relative to `static_dir`
    pub index_file: String,
    /// Maximum declared Content-Length for uploads
    pub max_upload_bytes: u64,
    /// Parent for per-request staging directories (system temp dir when unset)
    pub staging_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("."),
            index_file: "index.html".to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            staging_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}
