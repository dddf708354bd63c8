use crate::config::EncoderConfig;
use crate::error::AppError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Run the external encoder with `args` and wait for it to exit.
///
/// The child is killed if the future is dropped or the configured timeout
/// elapses. A non-zero exit becomes [`AppError::EncoderFailed`] carrying the
/// encoder's stderr.
pub async fn run_encoder(args: &[String], config: &EncoderConfig) -> Result<(), AppError> {
    debug!("Running {} {}", config.program, args.join(" "));

    let child = Command::new(&config.program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match config.timeout_secs {
        Some(secs) => {
            let limit = Duration::from_secs(secs);
            match tokio::time::timeout(limit, child).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("{} timed out after {}s", config.program, secs);
                    return Err(AppError::EncoderTimeout(limit));
                }
            }
        }
        None => child.await,
    }
    .map_err(|source| AppError::EncoderSpawn {
        program: config.program.clone(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        warn!("{} failed with status: {}", config.program, output.status);
        let message = if stderr.trim().is_empty() {
            format!("{} failed with status: {}", config.program, output.status)
        } else {
            stderr
        };
        return Err(AppError::EncoderFailed(message));
    }

    info!("{} finished successfully", config.program);
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::{FakeEncoder, fake_encoder};

    fn config_for(program: &std::path::Path) -> EncoderConfig {
        EncoderConfig {
            program: program.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn success_returns_ok() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_encoder(dir.path(), FakeEncoder::Succeed(b"ok"));
        let out = dir.path().join("out.mp4");

        let args = vec!["-i".to_string(), "in".to_string(), out.display().to_string()];
        run_encoder(&args, &config_for(&program)).await.unwrap();
        assert_eq!(std::fs::read(out).unwrap(), b"ok");
    }

    #[tokio::test]
    async fn failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_encoder(dir.path(), FakeEncoder::Fail("Invalid data found"));

        let err = run_encoder(&["x".to_string()], &config_for(&program))
            .await
            .unwrap_err();
        match err {
            AppError::EncoderFailed(stderr) => assert!(stderr.contains("Invalid data found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn quoted_stderr_is_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_encoder(dir.path(), FakeEncoder::Fail("Unknown encoder 'libx265'"));

        let err = run_encoder(&["x".to_string()], &config_for(&program))
            .await
            .unwrap_err();
        assert_eq!(err.client_message(), "Unknown encoder 'libx265'");
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let config = EncoderConfig {
            program: "/nonexistent/vidcompress-encoder".to_string(),
            ..Default::default()
        };
        let err = run_encoder(&[], &config).await.unwrap_err();
        assert!(matches!(err, AppError::EncoderSpawn { .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn hung_encoder_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_encoder(dir.path(), FakeEncoder::Hang);
        let config = EncoderConfig {
            timeout_secs: Some(1),
            ..config_for(&program)
        };

        let err = run_encoder(&[], &config).await.unwrap_err();
        assert!(matches!(err, AppError::EncoderTimeout(_)));
    }
}
