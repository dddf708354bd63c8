//! Shell-script stand-ins for ffmpeg used by tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub enum FakeEncoder<'a> {
    /// Write these bytes to the output path (the last argument) and exit 0
    Succeed(&'a [u8]),
    /// Print this text on stderr and exit 1
    Fail(&'a str),
    /// Append the argument list to `log`, pause, then succeed
    Record { log: &'a Path, output: &'a [u8] },
    /// Never exit on its own
    Hang,
}

/// Single-quote `value` for `/bin/sh`, escaping embedded quotes
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Write an executable fake encoder into `dir` and return its path
pub fn fake_encoder(dir: &Path, behavior: FakeEncoder<'_>) -> PathBuf {
    let body = match behavior {
        FakeEncoder::Succeed(output) => format!(
            "for last; do :; done\nprintf '%s' {} > \"$last\"\n",
            shell_quote(&String::from_utf8_lossy(output))
        ),
        FakeEncoder::Fail(stderr) => format!("printf '%s' {} >&2\nexit 1\n", shell_quote(stderr)),
        FakeEncoder::Record { log, output } => format!(
            "for last; do :; done\necho \"$@\" >> {}\nsleep 0.3\nprintf '%s' {} > \"$last\"\n",
            shell_quote(&log.display().to_string()),
            shell_quote(&String::from_utf8_lossy(output))
        ),
        FakeEncoder::Hang => "exec sleep 30\n".to_string(),
    };

    let path = dir.join("fake-ffmpeg");
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
