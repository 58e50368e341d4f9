//! Pipeline error type.
//!
//! Wraps the stage errors and attaches enough context (roster row,
//! performer name) to identify which record and which stage failed.

use thiserror::Error;

use mehfil_media::MediaError;
use mehfil_roster::RosterError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("roster: {0}")]
    Roster(#[from] RosterError),

    #[error("missing clip for roster row {row}: expected file '{expected}'")]
    MissingClip { expected: String, row: usize },

    #[error("roster is empty: no performer rows found")]
    EmptyRoster,

    #[error("row {row} ({performer}): {source}")]
    Record {
        /// 1-based roster row (first data row below the header is row 1)
        row: usize,
        performer: String,
        source: MediaError,
    },

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Attach row context to a per-record media failure.
    pub fn record(row: usize, performer: impl Into<String>, source: MediaError) -> Self {
        Self::Record {
            row,
            performer: performer.into(),
            source,
        }
    }
}
