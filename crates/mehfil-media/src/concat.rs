//! Final assembly via the concat demuxer.
//!
//! All segments are already normalized to one format, so concatenation is a
//! stream copy: write a list file, run the concat demuxer with `-c copy`.
//! No re-encoding happens here and the output gets `+faststart` for
//! progressive playback.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::command::{run_ffmpeg, FfmpegCommand};
use crate::error::{MediaError, MediaResult};

/// Concatenate `segments` in order into `output`.
///
/// `list_path` is where the concat list file is written; callers pass a
/// location inside the run's temp directory so it is cleaned up with the
/// rest of the intermediates.
pub async fn concat_segments(
    segments: &[PathBuf],
    list_path: &Path,
    output: &Path,
) -> MediaResult<()> {
    if segments.is_empty() {
        return Err(MediaError::Concatenation {
            message: "no segments to concatenate".to_string(),
            stderr: None,
        });
    }

    for segment in segments {
        if !segment.is_file() {
            return Err(MediaError::Concatenation {
                message: format!("segment is not readable: {}", segment.display()),
                stderr: None,
            });
        }
    }

    let list_content: String = segments.iter().map(|p| concat_list_entry(p)).collect();
    tokio::fs::write(list_path, &list_content).await?;

    info!(
        segments = segments.len(),
        output = %output.display(),
        "Concatenating segments with stream copy"
    );

    let cmd = FfmpegCommand::new(output)
        .concat_input(list_path)
        .codec_copy()
        .output_args(["-movflags", "+faststart"]);

    run_ffmpeg(&cmd)
        .await
        .map_err(|e| e.into_concatenation(format!("assembling {} segments", segments.len())))
}

/// One line of the concat demuxer list file.
///
/// Paths are single-quoted; embedded quotes use the close-escape-reopen
/// idiom the demuxer expects (`'` becomes `'\''`).
pub fn concat_list_entry(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', "'\\''");
    format!("file '{}'\n", escaped)
}
