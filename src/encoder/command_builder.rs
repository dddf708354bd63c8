use crate::config::EncoderConfig;
use crate::encoder::settings::CompressionSettings;
use std::path::Path;

/// Build FFmpeg arguments for compressing `input` into `output`
pub fn build_ffmpeg_args(
    settings: &CompressionSettings,
    input: &Path,
    output: &Path,
    config: &EncoderConfig,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-nostdin".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
    ];

    // Video encoder and quality
    args.extend([
        "-c:v".to_string(),
        settings.codec.ffmpeg_name().to_string(),
        "-crf".to_string(),
        settings.crf.to_string(),
        "-preset".to_string(),
        settings.speed.to_string(),
    ]);

    if let Some(scale) = &settings.scale {
        args.extend(["-vf".to_string(), format!("scale={}", scale)]);
    }

    if let Some(fps) = settings.fps {
        args.extend(["-r".to_string(), fps.to_string()]);
    }

    args.extend([
        "-c:a".to_string(),
        config.audio_codec.clone(),
        "-b:a".to_string(),
        config.audio_bitrate.clone(),
    ]);

    args.push(output.to_string_lossy().into_owned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::settings::Overrides;

    fn args_for(preset: &str, overrides: Overrides) -> Vec<String> {
        let settings = CompressionSettings::resolve(preset, &overrides);
        build_ffmpeg_args(
            &settings,
            Path::new("/tmp/in.mov"),
            Path::new("/tmp/in_compressed.mp4"),
            &EncoderConfig::default(),
        )
    }

    #[test]
    fn medium_preset_args() {
        assert_eq!(
            args_for("medium", Overrides::default()),
            vec![
                "-y",
                "-nostdin",
                "-i",
                "/tmp/in.mov",
                "-c:v",
                "libx264",
                "-crf",
                "23",
                "-preset",
                "medium",
                "-c:a",
                "aac",
                "-b:a",
                "128k",
                "/tmp/in_compressed.mp4",
            ]
        );
    }

    #[test]
    fn web_preset_adds_scale_filter() {
        let args = args_for("web", Overrides::default());
        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[vf + 1], "scale=1280:-2");
    }

    #[test]
    fn overrides_reach_the_command_line() {
        let args = args_for(
            "high",
            Overrides {
                crf: Some(30),
                fps: Some(24),
                codec: Some("h265".to_string()),
                ..Default::default()
            },
        );

        let joined = args.join(" ");
        assert!(joined.contains("-c:v libx265"));
        assert!(joined.contains("-crf 30"));
        assert!(joined.contains("-preset slow"));
        assert!(joined.contains("-r 24"));
        assert!(!joined.contains("-vf"));
        assert_eq!(args.last().unwrap(), "/tmp/in_compressed.mp4");
    }
}
