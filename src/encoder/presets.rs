/// A named bundle of default encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    /// Constant Rate Factor (0-51, lower = better quality)
    pub crf: u8,
    /// x264/x265 speed preset label
    pub speed: &'static str,
    /// Optional `width:height` scale filter
    pub scale: Option<&'static str>,
    pub description: &'static str,
}

/// Name used when a lookup does not match any built-in preset
pub const DEFAULT_PRESET: &str = "medium";

/// Built-in presets, in display order
pub static PRESETS: [Preset; 4] = [
    Preset {
        name: "high",
        crf: 18,
        speed: "slow",
        scale: None,
        description: "High quality, larger file",
    },
    Preset {
        name: "medium",
        crf: 23,
        speed: "medium",
        scale: None,
        description: "Balanced quality and size",
    },
    Preset {
        name: "low",
        crf: 28,
        speed: "fast",
        scale: None,
        description: "Lower quality, smaller file",
    },
    Preset {
        name: "web",
        crf: 25,
        speed: "medium",
        scale: Some("1280:-2"),
        description: "Optimized for web (720p)",
    },
];

impl Preset {
    /// Find a preset by exact name
    pub fn find(name: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.name == name)
    }

    /// Find a preset by name, falling back to "medium"
    pub fn lookup(name: &str) -> &'static Preset {
        Self::find(name).unwrap_or(&PRESETS[1])
    }
}
