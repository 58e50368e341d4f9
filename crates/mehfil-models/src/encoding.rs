//! Video encoding configuration.
//!
//! Every segment in the final compilation (title cards and performer clips
//! alike) is encoded to this single target format so the concat demuxer can
//! stream-copy without stream-layout mismatches.

use serde::{Deserialize, Serialize};

/// Default output width in pixels
pub const DEFAULT_WIDTH: u32 = 1920;
/// Default output height in pixels
pub const DEFAULT_HEIGHT: u32 = 1080;
/// Default output frame rate
pub const DEFAULT_FPS: u32 = 30;
/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "veryfast";
/// Default CRF (Constant Rate Factor)
pub const DEFAULT_CRF: u8 = 20;
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default audio sample rate in Hz
pub const DEFAULT_AUDIO_RATE: u32 = 48000;
/// Default audio channel count
pub const DEFAULT_AUDIO_CHANNELS: u32 = 2;

/// Target encoding for all intermediate segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Output frame rate
    pub fps: u32,
    /// Video codec (e.g., "libx264")
    pub codec: String,
    /// Encoding preset (e.g., "veryfast", "medium")
    pub preset: String,
    /// Constant Rate Factor (quality, 0-51, lower is better)
    pub crf: u8,
    /// Audio codec
    pub audio_codec: String,
    /// Audio sample rate in Hz
    pub audio_rate: u32,
    /// Audio channel count
    pub audio_channels: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_rate: DEFAULT_AUDIO_RATE,
            audio_channels: DEFAULT_AUDIO_CHANNELS,
        }
    }
}

impl EncodingConfig {
    /// Create a new encoding configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Video/audio codec arguments for an FFmpeg encode to this target.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-r".to_string(),
            self.fps.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-ar".to_string(),
            self.audio_rate.to_string(),
            "-ac".to_string(),
            self.audio_channels.to_string(),
        ]
    }

    /// `anullsrc` lavfi source spec matching this target's audio layout.
    pub fn silent_audio_source(&self) -> String {
        let layout = match self.audio_channels {
            1 => "mono",
            _ => "stereo",
        };
        format!("anullsrc=r={}:cl={}", self.audio_rate, layout)
    }
}
