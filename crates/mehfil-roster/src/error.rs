//! Error types for roster loading.

use thiserror::Error;

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Errors that can occur while loading the performer roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("cannot parse spreadsheet: {0}")]
    FileFormat(String),

    #[error("required column '{column}' not found in spreadsheet header")]
    MissingColumn { column: String },

    #[error("spreadsheet has no sheets")]
    NoSheet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for RosterError {
    fn from(e: calamine::Error) -> Self {
        match e {
            calamine::Error::Io(io) => Self::Io(io),
            other => Self::FileFormat(other.to_string()),
        }
    }
}
