//! Spreadsheet roster loading.
//!
//! Reads `Performer Data.xlsx` (or `.xls`) into an ordered list of
//! [`PerformerRecord`]s. Row order in the sheet determines segment order in
//! the final video, so it is preserved exactly.
//!
//! Header matching is exact: the sheet must contain `Name`, `Location`,
//! `Composition`, `Raag`, `Taal` and `Description` columns, in any order,
//! with any number of extra columns which are ignored. Empty cells become
//! empty strings on the record. Trailing rows where every required cell is
//! blank are trimmed as sheet padding; a blank row in the middle of the
//! sheet is kept, so record positions always match spreadsheet rows and
//! errors downstream name the true row number.

pub mod error;

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use mehfil_models::{PerformerRecord, REQUIRED_COLUMNS};

pub use error::{RosterError, RosterResult};

/// Load the performer roster from a spreadsheet file.
///
/// Reads the first sheet of the workbook. The first row is the header row;
/// every subsequent row produces one record, in order.
pub fn load_roster(path: impl AsRef<Path>) -> RosterResult<Vec<PerformerRecord>> {
    let path = path.as_ref();

    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(RosterError::NoSheet)?
        .map_err(RosterError::from)?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| RosterError::FileFormat("spreadsheet has no header row".to_string()))?;

    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let data: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    let records = parse_rows(&headers, data)?;

    info!(
        spreadsheet = %path.display(),
        performers = records.len(),
        "Loaded performer roster"
    );

    Ok(records)
}

/// Map header names to column indices and build records, preserving row
/// order. Pure so header matching and ordering are testable without
/// workbook files.
pub fn parse_rows(
    headers: &[String],
    rows: Vec<Vec<String>>,
) -> RosterResult<Vec<PerformerRecord>> {
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
        indices[i] = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| RosterError::MissingColumn {
                column: column.to_string(),
            })?;
    }

    let field = |row: &[String], i: usize| row.get(indices[i]).cloned().unwrap_or_default();

    let mut records = Vec::new();
    for row in &rows {
        let row: &[String] = row;
        let record = PerformerRecord {
            name: field(row, 0),
            location: field(row, 1),
            composition: field(row, 2),
            raag: field(row, 3),
            taal: field(row, 4),
            description: field(row, 5),
        };

        records.push(record);
    }

    // Trailing blank rows are sheet padding. Mid-sheet blanks are kept so
    // record positions stay aligned with spreadsheet rows and later errors
    // report the true row number.
    let full_len = records.len();
    while records.last().is_some_and(|r| r.is_blank()) {
        records.pop();
    }
    if records.len() < full_len {
        debug!(
            trimmed = full_len - records.len(),
            "Trimmed trailing blank spreadsheet rows"
        );
    }

    Ok(records)
}

/// Render a spreadsheet cell as text. Numeric cells that hold whole numbers
/// render without a trailing `.0` so a location like "221" round-trips into
/// the filename convention unchanged.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
