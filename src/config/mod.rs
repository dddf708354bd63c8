pub mod types;

pub use types::*;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External encoder settings
    pub encoder: EncoderConfig,
    /// Web interface settings
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from TOML file, or create default if not found
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                    return Self::default();
                }
            }
        }

        let config = Self::default();
        // Save default config for future editing
        if let Err(e) = config.save() {
            warn!("Failed to save default config: {}", e);
        }
        config
    }

    /// Save configuration to TOML file
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidcompress")
            .join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.encoder.program.trim().is_empty() {
            return Err(AppError::Config(
                "Encoder program must not be empty".to_string(),
            ));
        }
        if self.encoder.timeout_secs == Some(0) {
            return Err(AppError::Config(
                "Encoder timeout must be at least one second".to_string(),
            ));
        }
        if self.server.max_upload_bytes == 0 || self.server.max_upload_bytes > MAX_UPLOAD_BYTES {
            return Err(AppError::Config(format!(
                "Upload limit must be between 1 and {} bytes",
                MAX_UPLOAD_BYTES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.encoder.program, "ffmpeg");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_upload_bytes, 4 * 1024 * 1024 * 1024);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.index_file, "index.html");
        assert_eq!(config.encoder.audio_bitrate, "128k");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.encoder.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.max_upload_bytes = MAX_UPLOAD_BYTES + 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.encoder.program = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(
            AppConfig::load_from_file(&path),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.encoder.timeout_secs = Some(600);
        config.server.staging_dir = Some(PathBuf::from("/var/tmp/vidcompress"));

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.encoder.timeout_secs, Some(600));
        assert_eq!(
            parsed.server.staging_dir,
            Some(PathBuf::from("/var/tmp/vidcompress"))
        );
    }
}
