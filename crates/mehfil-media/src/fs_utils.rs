//! Atomic publication of the final output file.
//!
//! The pipeline writes the assembled video to a temporary path and only
//! moves it to the final name once assembly has fully succeeded, so a
//! failed or interrupted run never leaves a partial file at the output
//! path. The move handles EXDEV (temp dir and output on different
//! filesystems) by copying to a sibling temp file and renaming.

use std::path::Path;
use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Move the finished output from `src` to `dst`, replacing any previous
/// output in one step.
pub async fn publish_output(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            tracing::debug!(
                "Cross-device rename, falling back to copy+rename: {} -> {}",
                src.display(),
                dst.display()
            );
            copy_then_rename(src, dst).await
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

/// Copy to a temp file beside `dst`, then rename on the destination
/// filesystem so the final name still appears atomically.
async fn copy_then_rename(src: &Path, dst: &Path) -> MediaResult<()> {
    let tmp_dst = dst.with_extension("publish.tmp");

    fs::copy(src, &tmp_dst).await?;

    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = std::fs::remove_file(&tmp_dst);
        return Err(MediaError::from(e));
    }

    if let Err(e) = fs::remove_file(src).await {
        tracing::warn!(
            "Failed to remove temp output after publish: {}: {}",
            src.display(),
            e
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_publish_moves_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("assembled.mp4");
        let dst = dir.path().join("FINAL_VIDEO.mp4");

        fs::write(&src, b"video bytes").await.unwrap();

        publish_output(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).await.unwrap(), b"video bytes");
    }

    #[tokio::test]
    async fn test_publish_replaces_previous_output() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("assembled.mp4");
        let dst = dir.path().join("FINAL_VIDEO.mp4");

        fs::write(&src, b"new run").await.unwrap();
        fs::write(&dst, b"previous run").await.unwrap();

        publish_output(&src, &dst).await.unwrap();

        assert_eq!(fs::read(&dst).await.unwrap(), b"new run");
    }

    #[tokio::test]
    async fn test_publish_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let err = publish_output(dir.path().join("gone.mp4"), dir.path().join("out.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Io(_)));
    }

    #[test]
    fn test_is_cross_device_error() {
        assert!(is_cross_device_error(&std::io::Error::from_raw_os_error(18)));
        assert!(!is_cross_device_error(&std::io::Error::from_raw_os_error(2)));
    }
}
