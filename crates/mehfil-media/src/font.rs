//! Bold typeface resolution for the title card renderer.
//!
//! The renderer needs a concrete font file for FFmpeg's `drawtext` filter.
//! An explicitly configured path must exist; otherwise a fixed list of
//! common bold sans-serif system fonts is searched. Resolution happens once
//! at startup, before any record-level work, so a missing font fails the
//! whole run fast instead of failing on the first card.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Bold sans-serif fonts probed in order when no font path is configured.
pub const DEFAULT_FONT_CANDIDATES: [&str; 7] = [
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Resolve the typeface for title cards.
///
/// With an explicit path the file must exist; no fallback is attempted so a
/// typo'd configuration cannot silently swap fonts mid-run.
pub fn resolve_font(explicit: Option<&Path>) -> MediaResult<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            debug!(font = %path.display(), "Using configured font");
            return Ok(path.to_path_buf());
        }
        return Err(MediaError::FontUnavailable(format!(
            "configured font does not exist: {}",
            path.display()
        )));
    }

    for candidate in DEFAULT_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.is_file() {
            debug!(font = %path.display(), "Using system font");
            return Ok(path.to_path_buf());
        }
    }

    Err(MediaError::FontUnavailable(format!(
        "no font found; searched: {}",
        DEFAULT_FONT_CANDIDATES.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_font_must_exist() {
        let err = resolve_font(Some(Path::new("/no/such/font.ttf"))).unwrap_err();
        match err {
            MediaError::FontUnavailable(msg) => assert!(msg.contains("/no/such/font.ttf")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_font_used_when_present() {
        let dir = TempDir::new().unwrap();
        let font = dir.path().join("Bold.ttf");
        std::fs::write(&font, b"not really a font").unwrap();

        let resolved = resolve_font(Some(&font)).unwrap();
        assert_eq!(resolved, font);
    }

    #[test]
    fn test_explicit_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = resolve_font(Some(dir.path())).unwrap_err();
        assert!(matches!(err, MediaError::FontUnavailable(_)));
    }
}
