use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Uniquely named per-request directory, removed when dropped.
pub struct StagingDir {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl StagingDir {
    /// Create a fresh directory under `root`, or the system temp dir
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("vidcompress-");

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        debug!("Created staging directory {}", dir.path().display());
        Ok(Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now instead of waiting for drop
    pub fn close(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!("Removed staging directory {}", self.path.display()),
                Err(e) => warn!(
                    "Failed to remove staging directory {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let staging = StagingDir::create(Some(root.path())).unwrap();
            std::fs::write(staging.path().join("clip.mov"), b"data").unwrap();
            staging.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn close_removes_contents() {
        let root = tempfile::tempdir().unwrap();
        let staging = StagingDir::create(Some(root.path())).unwrap();
        let path = staging.path().to_path_buf();
        std::fs::write(path.join("clip.mov"), b"data").unwrap();

        staging.close();
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn names_are_unique() {
        let root = tempfile::tempdir().unwrap();
        let a = StagingDir::create(Some(root.path())).unwrap();
        let b = StagingDir::create(Some(root.path())).unwrap();
        assert_ne!(a.path(), b.path());
        assert!(
            a.path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("vidcompress-")
        );
    }

    #[test]
    fn missing_root_is_created() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        let staging = StagingDir::create(Some(&nested)).unwrap();
        assert!(staging.path().starts_with(&nested));
    }
}
