//! Performer roster records.

use serde::{Deserialize, Serialize};

/// Spreadsheet headers that must be present, matched exactly (no case
/// normalization). Column order in the sheet is irrelevant.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Name",
    "Location",
    "Composition",
    "Raag",
    "Taal",
    "Description",
];

/// One row of the performer roster.
///
/// Constructed once by the roster loader and immutable afterwards. Empty
/// cells load as empty strings and are carried through to rendering, where
/// they produce blank text rather than a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerRecord {
    pub name: String,
    pub location: String,
    pub composition: String,
    pub raag: String,
    pub taal: String,
    pub description: String,
}

impl PerformerRecord {
    /// The expected filename of this performer's submitted clip.
    ///
    /// The convention is `"{name}_{location}.mp4"` with no transformation
    /// of either field: no case folding, no whitespace trimming. Matching
    /// against the working directory is exact and case-sensitive.
    pub fn clip_filename(&self) -> String {
        format!("{}_{}.mp4", self.name, self.location)
    }

    /// True when every required cell in the row is empty or whitespace
    /// only. Such rows are sheet padding, not performers.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.location,
            &self.composition,
            &self.raag,
            &self.taal,
            &self.description,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}
