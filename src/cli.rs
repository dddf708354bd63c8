use crate::encoder::{CompressionSettings, DEFAULT_PRESET, Overrides, PRESETS};
use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use tracing::warn;

const EXAMPLES: &str = "\
Examples:
  vidcompress video.mov                    # Compress with medium preset
  vidcompress video.mov -p high            # High quality compression
  vidcompress video.mov -p web             # Optimize for web (720p)
  vidcompress video.mov --crf 20           # Custom quality (0-51)
  vidcompress video.mov --scale 1920:-2    # Scale to 1080p
  vidcompress video.mov --fps 30           # Set to 30 FPS
  vidcompress --web                        # Start web interface";

/// Compress video files with ffmpeg
#[derive(Debug, Parser)]
#[command(name = "vidcompress", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Input video file
    pub input: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compression preset
    #[arg(short, long, default_value = DEFAULT_PRESET, value_parser = ["high", "medium", "low", "web"])]
    pub preset: String,

    /// CRF value (0-51, lower = better quality)
    #[arg(long, allow_negative_numbers = true)]
    pub crf: Option<i64>,

    /// Video scale (e.g., 1280:-2 for 720p)
    #[arg(long)]
    pub scale: Option<String>,

    /// Target FPS
    #[arg(long, allow_negative_numbers = true)]
    pub fps: Option<i64>,

    /// Video codec
    #[arg(long, default_value = "h264", value_parser = ["h264", "h265"])]
    pub codec: String,

    /// Start web interface
    #[arg(long)]
    pub web: bool,

    /// List available presets
    #[arg(long)]
    pub list_presets: bool,

    /// Port for the web interface (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            crf: self.crf,
            scale: self.scale.clone(),
            fps: self.fps,
            codec: Some(self.codec.clone()),
        }
    }

    /// Resolve settings, warning about overrides that were dropped
    pub fn settings(&self) -> CompressionSettings {
        let settings = CompressionSettings::resolve(&self.preset, &self.overrides());

        if let Some(crf) = self.crf
            && i64::from(settings.crf) != crf
        {
            warn!("Ignoring crf {} (must be 0-51)", crf);
        }
        if let Some(fps) = self.fps
            && settings.fps.is_none()
        {
            warn!("Ignoring fps {} (must be 1-120)", fps);
        }
        if let Some(scale) = &self.scale
            && settings.scale.as_deref() != Some(scale.as_str())
        {
            warn!("Ignoring scale '{}' (expected WIDTH:HEIGHT)", scale);
        }
        settings
    }
}

/// Write the usage text shown when no input is given
pub fn write_usage(out: &mut impl io::Write) -> io::Result<()> {
    Cli::command().write_help(out)
}

/// Text printed by `--list-presets`
pub fn preset_listing() -> String {
    let mut out = String::from("\nAvailable presets:\n");
    for preset in PRESETS {
        out.push_str(&format!("  {:8} - {}\n", preset.name, preset.description));
        out.push_str(&format!(
            "           CRF: {}, Preset: {}\n",
            preset.crf, preset.speed
        ));
        if let Some(scale) = preset.scale {
            out.push_str(&format!("           Scale: {}\n", scale));
        }
    }
    out
}
