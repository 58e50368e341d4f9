//! Media backend seam.
//!
//! The renderer and concatenator stages go through this trait so the
//! pipeline can be exercised in tests with fakes instead of real FFmpeg
//! runs and real media files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use mehfil_media::{
    concat_segments, normalize_clip, render_title_card, MediaResult,
};
use mehfil_models::{EncodingConfig, PerformerRecord};

/// Media operations the pipeline needs from its rendering layer.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Render one performer's title card segment to `output`.
    async fn render_title_card(&self, record: &PerformerRecord, output: &Path)
        -> MediaResult<()>;

    /// Re-encode a performer clip to the target format at `output`.
    async fn normalize_clip(&self, input: &Path, output: &Path) -> MediaResult<()>;

    /// Concatenate `segments` in order into `output`, using `list_path`
    /// for the demuxer list file.
    async fn concatenate(
        &self,
        segments: &[PathBuf],
        list_path: &Path,
        output: &Path,
    ) -> MediaResult<()>;
}

/// The real backend: drives FFmpeg through `mehfil-media`.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    font: PathBuf,
    encoding: EncodingConfig,
    card_duration_secs: f64,
}

impl FfmpegBackend {
    /// Create a backend with a resolved font path.
    pub fn new(font: PathBuf, encoding: EncodingConfig, card_duration_secs: f64) -> Self {
        Self {
            font,
            encoding,
            card_duration_secs,
        }
    }
}

#[async_trait]
impl MediaBackend for FfmpegBackend {
    async fn render_title_card(
        &self,
        record: &PerformerRecord,
        output: &Path,
    ) -> MediaResult<()> {
        render_title_card(
            record,
            &self.font,
            &self.encoding,
            self.card_duration_secs,
            output,
        )
        .await
    }

    async fn normalize_clip(&self, input: &Path, output: &Path) -> MediaResult<()> {
        normalize_clip(input, output, &self.encoding).await
    }

    async fn concatenate(
        &self,
        segments: &[PathBuf],
        list_path: &Path,
        output: &Path,
    ) -> MediaResult<()> {
        concat_segments(segments, list_path, output).await
    }
}
