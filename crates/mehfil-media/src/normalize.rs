//! Clip normalization.
//!
//! Performer submissions arrive in whatever resolution, frame rate and
//! orientation their phones produced. Before concatenation every clip is
//! re-encoded to the single target format: scaled to fit the output frame
//! (aspect preserved), padded with black, constant frame rate, H.264 video
//! and AAC audio. Clips that carry no audio stream get a silent track
//! injected so the concat demuxer always sees the same stream layout.

use std::path::Path;
use tracing::{debug, info};

use mehfil_models::EncodingConfig;

use crate::command::{run_ffmpeg, FfmpegCommand};
use crate::error::MediaResult;
use crate::probe::probe_video;

/// Scale-and-pad filter bringing any source geometry to the target frame.
pub fn build_normalize_filter(encoding: &EncodingConfig) -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,\
         pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black,fps={fps}",
        w = encoding.width,
        h = encoding.height,
        fps = encoding.fps
    )
}

/// Re-encode `input` to the target format at `output`.
pub async fn normalize_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let info = probe_video(input).await?;
    debug!(
        input = %input.display(),
        width = info.width,
        height = info.height,
        fps = info.fps,
        has_audio = info.has_audio,
        "Probed clip before normalization"
    );

    let mut cmd = FfmpegCommand::new(output).input(input);

    if !info.has_audio {
        // Silent source is infinite; -shortest ends it with the video.
        cmd = cmd.lavfi_input(encoding.silent_audio_source()).shortest();
    }

    let cmd = cmd
        .video_filter(build_normalize_filter(encoding))
        .output_args(encoding.to_ffmpeg_args());

    run_ffmpeg(&cmd)
        .await
        .map_err(|e| e.into_render(format!("normalizing '{}'", input.display())))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "Normalized clip to target format"
    );

    Ok(())
}
