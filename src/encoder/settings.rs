use super::presets::Preset;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const CRF_RANGE: std::ops::RangeInclusive<i64> = 0..=51;
pub const FPS_RANGE: std::ops::RangeInclusive<i64> = 1..=120;

static SCALE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+:-?[0-9]+$").expect("scale pattern is valid"));

/// Output video codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    #[default]
    H264,
    H265,
}

impl Codec {
    /// Parse a codec name; anything other than "h265" is H.264
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "h265" => Codec::H265,
            _ => Codec::H264,
        }
    }

    /// Whether `value` names a supported codec
    pub fn is_known(value: &str) -> bool {
        matches!(value, "h264" | "h265")
    }

    /// FFmpeg encoder name
    pub fn ffmpeg_name(&self) -> &'static str {
        match self {
            Codec::H264 => "libx264",
            Codec::H265 => "libx265",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::H264 => write!(f, "h264"),
            Codec::H265 => write!(f, "h265"),
        }
    }
}

/// Caller-supplied overrides, not yet validated
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub crf: Option<i64>,
    pub scale: Option<String>,
    pub fps: Option<i64>,
    pub codec: Option<String>,
}

/// Accept a CRF value only when it lies in 0-51
pub fn accept_crf(crf: i64) -> Option<u8> {
    if CRF_RANGE.contains(&crf) {
        u8::try_from(crf).ok()
    } else {
        None
    }
}

/// Accept a frame rate only when it lies in 1-120
pub fn accept_fps(fps: i64) -> Option<u32> {
    if FPS_RANGE.contains(&fps) {
        u32::try_from(fps).ok()
    } else {
        None
    }
}

/// Accept a `width:height` scale spec such as `1280:-2`
pub fn accept_scale(scale: &str) -> bool {
    SCALE_PATTERN.is_match(scale)
}

/// Fully resolved settings for one encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionSettings {
    pub preset: &'static str,
    pub crf: u8,
    pub speed: &'static str,
    pub scale: Option<String>,
    pub fps: Option<u32>,
    pub codec: Codec,
}

impl CompressionSettings {
    /// Merge a preset with overrides. Invalid overrides are dropped silently.
    pub fn resolve(preset_name: &str, overrides: &Overrides) -> Self {
        let preset = Preset::lookup(preset_name);

        let crf = overrides.crf.and_then(accept_crf).unwrap_or(preset.crf);
        let scale = overrides
            .scale
            .as_deref()
            .filter(|s| accept_scale(s))
            .map(str::to_string)
            .or_else(|| preset.scale.map(str::to_string));
        let fps = overrides.fps.and_then(accept_fps);
        let codec = overrides
            .codec
            .as_deref()
            .map(Codec::parse_lenient)
            .unwrap_or_default();

        Self {
            preset: preset.name,
            crf,
            speed: preset.speed,
            scale,
            fps,
            codec,
        }
    }
}
