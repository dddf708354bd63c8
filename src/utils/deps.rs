use std::process::{Command, Stdio};

/// Check whether the external encoder can be started
pub fn encoder_available(program: &str) -> bool {
    check_command(program, &["-version"])
}

/// Check if a command is available
fn check_command(cmd: &str, args: &[&str]) -> bool {
    Command::new(cmd)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_unavailable() {
        assert!(!encoder_available("/nonexistent/vidcompress-ffmpeg"));
    }
}
