//! FFmpeg CLI wrapper for the mehfil pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building (multi-input, lavfi-aware)
//! - FFprobe JSON parsing
//! - Bold typeface resolution for `drawtext`
//! - Title card synthesis, clip normalization and concat-demuxer assembly
//! - Atomic publication of the final output

pub mod card;
pub mod command;
pub mod concat;
pub mod error;
pub mod font;
pub mod fs_utils;
pub mod normalize;
pub mod probe;

pub use card::{build_card_filter, render_title_card};
pub use command::{check_ffmpeg, check_ffprobe, run_ffmpeg, FfmpegCommand};
pub use concat::concat_segments;
pub use error::{MediaError, MediaResult};
pub use font::resolve_font;
pub use fs_utils::publish_output;
pub use normalize::normalize_clip;
pub use probe::{probe_video, VideoInfo};
