//! File Resolver stage.
//!
//! Maps each roster record to its expected clip file and confirms the file
//! exists before any rendering work starts. Matching is exact and
//! case-sensitive: directory entry names are compared byte-for-byte against
//! the convention `"{name}_{location}.mp4"`, so a case-insensitive
//! filesystem cannot mask a wrongly cased submission. The run aborts on the
//! first missing clip, naming the exact filename that was expected.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use mehfil_models::PerformerRecord;

use crate::error::{PipelineError, PipelineResult};

/// A roster record paired with its verified clip path.
#[derive(Debug, Clone)]
pub struct ResolvedPerformer {
    pub record: PerformerRecord,
    pub clip_path: PathBuf,
}

/// Resolve every record's clip in `dir`, preserving roster order.
pub fn resolve_clips(
    records: &[PerformerRecord],
    dir: &Path,
) -> PipelineResult<Vec<ResolvedPerformer>> {
    let entries: HashSet<OsString> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .collect();

    let mut resolved = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let expected = record.clip_filename();
        if !entries.contains(&OsString::from(&expected)) {
            return Err(PipelineError::MissingClip {
                expected,
                row: i + 1,
            });
        }

        debug!(performer = %record.name, clip = %expected, "Clip resolved");
        resolved.push(ResolvedPerformer {
            record: record.clone(),
            clip_path: dir.join(&expected),
        });
    }

    info!(clips = resolved.len(), "All performer clips present on disk");
    Ok(resolved)
}
