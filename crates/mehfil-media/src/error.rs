//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("no usable bold typeface: {0}")]
    FontUnavailable(String),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("title card rendering failed: {message}")]
    Render {
        message: String,
        stderr: Option<String>,
    },

    #[error("concatenation failed: {message}")]
    Concatenation {
        message: String,
        stderr: Option<String>,
    },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid video file: {0}")]
    InvalidVideo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Rewrap a low-level FFmpeg failure as a rendering error with context.
    /// Other error kinds pass through unchanged.
    pub fn into_render(self, context: impl Into<String>) -> Self {
        match self {
            Self::FfmpegFailed { stderr, .. } => Self::Render {
                message: context.into(),
                stderr,
            },
            other => other,
        }
    }

    /// Rewrap a low-level FFmpeg failure as a concatenation error with
    /// context. Other error kinds pass through unchanged.
    pub fn into_concatenation(self, context: impl Into<String>) -> Self {
        match self {
            Self::FfmpegFailed { stderr, .. } => Self::Concatenation {
                message: context.into(),
                stderr,
            },
            other => other,
        }
    }
}
