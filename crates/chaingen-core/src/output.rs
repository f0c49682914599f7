//! Output file system used to persist generated artifacts.

use async_trait::async_trait;
use std::path::Path;

/// Destination for generated files.
///
/// Writes are independent and non-atomic; regenerating is idempotent, so a
/// truncated file from an interrupted run is simply overwritten next time.
#[async_trait]
pub trait OutputFs: Send + Sync {
    /// Create `path` and all missing parents.
    async fn ensure_dir(&self, path: &Path) -> std::io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    async fn write_file(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}

/// The local disk, via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl OutputFs for LocalFs {
    async fn ensure_dir(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn write_file(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        LocalFs.ensure_dir(&nested).await.unwrap();
        LocalFs.ensure_dir(&nested).await.unwrap();

        let file = nested.join("x.ts");
        LocalFs.write_file(&file, "first").await.unwrap();
        LocalFs.write_file(&file, "second").await.unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "second");
    }
}
