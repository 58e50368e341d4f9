//! Pipeline configuration.
//!
//! All tunables are an explicit struct passed into [`crate::run`], not
//! environment coupling. Defaults match the conventional layout: the
//! spreadsheet and performer clips sit in the working directory and the
//! final video is written beside them.

use std::path::{Path, PathBuf};

use mehfil_models::EncodingConfig;

/// Default spreadsheet filename
pub const DEFAULT_SPREADSHEET: &str = "Performer Data.xlsx";
/// Default output filename
pub const DEFAULT_OUTPUT: &str = "FINAL_VIDEO.mp4";
/// Default title card duration in seconds
pub const DEFAULT_CARD_DURATION_SECS: f64 = 5.0;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the spreadsheet and performer clips
    pub work_dir: PathBuf,
    /// Spreadsheet path; joined onto `work_dir` when relative
    pub spreadsheet: PathBuf,
    /// Output path; joined onto `work_dir` when relative
    pub output: PathBuf,
    /// Title card display duration in seconds
    pub card_duration_secs: f64,
    /// Explicit font file; `None` searches the system bold sans candidates
    pub font_path: Option<PathBuf>,
    /// Target encoding for every segment
    pub encoding: EncodingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            spreadsheet: PathBuf::from(DEFAULT_SPREADSHEET),
            output: PathBuf::from(DEFAULT_OUTPUT),
            card_duration_secs: DEFAULT_CARD_DURATION_SECS,
            font_path: None,
            encoding: EncodingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Absolute-or-workdir-relative spreadsheet path.
    pub fn spreadsheet_path(&self) -> PathBuf {
        join_work_dir(&self.work_dir, &self.spreadsheet)
    }

    /// Absolute-or-workdir-relative output path.
    pub fn output_path(&self) -> PathBuf {
        join_work_dir(&self.work_dir, &self.output)
    }
}

fn join_work_dir(work_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        work_dir.join(path)
    }
}
