//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// One FFmpeg input: a file path or a lavfi source spec.
#[derive(Debug, Clone)]
struct Input {
    /// Demuxer format forced with `-f`, e.g. "lavfi" or "concat"
    format: Option<String>,
    /// Extra arguments placed before this input's `-i`
    args: Vec<String>,
    /// The `-i` argument itself
    source: String,
}

/// Builder for FFmpeg commands.
///
/// Supports multiple inputs so title cards can be synthesized from lavfi
/// sources (`color` background plus `anullsrc` silent audio) in one pass.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    inputs: Vec<Input>,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after the inputs)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command writing to `output`.
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            inputs: Vec::new(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add a file input.
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(Input {
            format: None,
            args: Vec::new(),
            source: path.as_ref().to_string_lossy().to_string(),
        });
        self
    }

    /// Add a lavfi source input (e.g. `color=c=black:s=1920x1080` or
    /// `anullsrc=r=48000:cl=stereo`).
    pub fn lavfi_input(mut self, spec: impl Into<String>) -> Self {
        self.inputs.push(Input {
            format: Some("lavfi".to_string()),
            args: Vec::new(),
            source: spec.into(),
        });
        self
    }

    /// Add a concat demuxer list input with `-safe 0`.
    pub fn concat_input(mut self, list_path: impl AsRef<Path>) -> Self {
        self.inputs.push(Input {
            format: Some("concat".to_string()),
            args: vec!["-safe".to_string(), "0".to_string()],
            source: list_path.as_ref().to_string_lossy().to_string(),
        });
        self
    }

    /// Add an output argument (after the inputs).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments.
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set video filter.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Copy all streams without re-encoding.
    pub fn codec_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Stop writing when the shortest stream ends. Used when pairing a
    /// finite video with an infinite `anullsrc` audio source.
    pub fn shortest(self) -> Self {
        self.output_arg("-shortest")
    }

    /// The output path this command writes to.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Build the command argument list.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-hide_banner".to_string());
        args.push("-loglevel".to_string());
        args.push(self.log_level.clone());

        for input in &self.inputs {
            if let Some(format) = &input.format {
                args.push("-f".to_string());
                args.push(format.clone());
            }
            args.extend(input.args.clone());
            args.push("-i".to_string());
            args.push(input.source.clone());
        }

        args.extend(self.output_args.clone());
        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Run an FFmpeg command to completion, capturing stderr.
///
/// Stdout/stderr are not streamed; the pipeline is one-shot and sequential,
/// so the stderr tail on failure is all the diagnostics we need.
pub async fn run_ffmpeg(cmd: &FfmpegCommand) -> MediaResult<()> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let args = cmd.build_args();
    debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

    let output = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some(stderr_tail(&stderr)),
            output.status.code(),
        ))
    }
}

/// Last few stderr lines, which is where FFmpeg puts the actual failure.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(5);
    lines[start..].join("\n")
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder_single_input() {
        let cmd = FfmpegCommand::new("out.mp4")
            .input("in.mp4")
            .video_filter("scale=1920:1080")
            .output_args(["-c:v", "libx264"]);

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"-i".to_string()));
        assert!(args.contains(&"in.mp4".to_string()));
        assert!(args.contains(&"scale=1920:1080".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_lavfi_inputs_carry_format_flag() {
        let cmd = FfmpegCommand::new("card.mp4")
            .lavfi_input("color=c=black:s=1920x1080:r=30:d=5")
            .lavfi_input("anullsrc=r=48000:cl=stereo")
            .shortest();

        let args = cmd.build_args();
        let lavfi_count = args.iter().filter(|a| a.as_str() == "lavfi").count();
        assert_eq!(lavfi_count, 2);
        assert!(args.contains(&"-shortest".to_string()));

        // -f lavfi must precede its -i
        let f_pos = args.iter().position(|a| a == "-f").unwrap();
        let i_pos = args.iter().position(|a| a == "-i").unwrap();
        assert!(f_pos < i_pos);
    }

    #[test]
    fn test_concat_input_is_unsafe_paths() {
        let cmd = FfmpegCommand::new("final.mp4")
            .concat_input("list.txt")
            .codec_copy();

        let args = cmd.build_args();
        assert!(args.contains(&"concat".to_string()));
        assert!(args.contains(&"-safe".to_string()));
        assert!(args.contains(&"0".to_string()));
        assert!(args.contains(&"copy".to_string()));
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = "a\nb\nc\nd\ne\nf\ng";
        assert_eq!(stderr_tail(stderr), "c\nd\ne\nf\ng");
        assert_eq!(stderr_tail("only"), "only");
    }
}
