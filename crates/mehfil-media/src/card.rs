//! Title card rendering.
//!
//! A title card is a fixed-duration video segment showing one performer's
//! details as white bold text on a black background, with a silent audio
//! track. The whole card is synthesized by FFmpeg in a single pass: a lavfi
//! `color` source for the background, an `anullsrc` source for audio, and a
//! `drawtext` filter chain for the text. Cards are encoded straight to the
//! target format so they never need a second normalization pass.
//!
//! Layout (for a 1080p card): performer name large near the top with the
//! location in parentheses under it, the free-text description wrapped at
//! nine words per line across the middle, then composition, raag and taal
//! stacked in the lower half. All values are title-cased. Empty fields draw
//! nothing rather than a placeholder.

use std::path::Path;
use tracing::info;

use mehfil_models::{title_case, EncodingConfig, PerformerRecord};

use crate::command::{run_ffmpeg, FfmpegCommand};
use crate::error::MediaResult;

/// Font size for the performer name
pub const NAME_FONT_SIZE: u32 = 85;
/// Font size for the location line
pub const LOCATION_FONT_SIZE: u32 = 60;
/// Font size for description lines
pub const DESCRIPTION_FONT_SIZE: u32 = 45;
/// Font size for the composition line
pub const COMPOSITION_FONT_SIZE: u32 = 80;
/// Font size for the raag line
pub const RAAG_FONT_SIZE: u32 = 70;
/// Font size for the taal line
pub const TAAL_FONT_SIZE: u32 = 60;
/// Words per wrapped description line
pub const DESCRIPTION_WORDS_PER_LINE: usize = 9;
/// Vertical step between description lines in pixels
pub const DESCRIPTION_LINE_STEP: u32 = 60;

/// Render one performer's title card to `output`.
pub async fn render_title_card(
    record: &PerformerRecord,
    font: &Path,
    encoding: &EncodingConfig,
    duration_secs: f64,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let output = output.as_ref();

    info!(performer = %record.name, "Rendering title card");

    let background = format!(
        "color=c=black:s={}x{}:r={}:d={:.3}",
        encoding.width, encoding.height, encoding.fps, duration_secs
    );

    let cmd = FfmpegCommand::new(output)
        .lavfi_input(background)
        .lavfi_input(encoding.silent_audio_source())
        .video_filter(build_card_filter(record, font, encoding))
        .output_args(encoding.to_ffmpeg_args())
        .shortest();

    run_ffmpeg(&cmd)
        .await
        .map_err(|e| e.into_render(format!("title card for '{}'", record.name)))
}

/// Build the full `drawtext` filter chain for one record.
pub fn build_card_filter(record: &PerformerRecord, font: &Path, encoding: &EncodingConfig) -> String {
    let h = encoding.height;
    let mut lines: Vec<(String, u32, u32)> = Vec::new();

    lines.push((title_case(&record.name), NAME_FONT_SIZE, h / 6));
    if !record.location.is_empty() {
        lines.push((
            format!("({})", title_case(&record.location)),
            LOCATION_FONT_SIZE,
            h / 6 + 90,
        ));
    }

    let mut y = h / 3 + 40;
    for line in wrap_description(&record.description, DESCRIPTION_WORDS_PER_LINE) {
        lines.push((line, DESCRIPTION_FONT_SIZE, y));
        y += DESCRIPTION_LINE_STEP;
    }

    lines.push((
        title_case(&record.composition),
        COMPOSITION_FONT_SIZE,
        h / 2 + 80,
    ));
    if !record.raag.is_empty() {
        lines.push((
            format!("Raag {}", title_case(&record.raag)),
            RAAG_FONT_SIZE,
            h / 2 + 190,
        ));
    }
    if !record.taal.is_empty() {
        lines.push((
            format!("({})", title_case(&record.taal)),
            TAAL_FONT_SIZE,
            h / 2 + 280,
        ));
    }

    let font = escape_drawtext(&font.to_string_lossy());
    lines
        .iter()
        .filter(|(text, _, _)| !text.is_empty())
        .map(|(text, size, y)| drawtext_line(text, &font, *size, *y))
        .collect::<Vec<_>>()
        .join(",")
}

/// One centered `drawtext` filter. `font` must already be escaped.
fn drawtext_line(text: &str, font: &str, size: u32, y: u32) -> String {
    format!(
        "drawtext=fontfile='{}':text='{}':fontcolor=white:fontsize={}:x=(w-text_w)/2:y={}",
        font,
        escape_drawtext(text),
        size,
        y
    )
}

/// Split a description into lines of at most `words_per_line` words.
/// Returns no lines for blank input.
pub fn wrap_description(description: &str, words_per_line: usize) -> Vec<String> {
    let words: Vec<&str> = description.split_whitespace().collect();
    words
        .chunks(words_per_line)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Escape text for use inside a single-quoted `drawtext` option within a
/// filter graph. Backslash must go first.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('%', "\\%")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record() -> PerformerRecord {
        PerformerRecord {
            name: "chirag agarwal".to_string(),
            location: "london".to_string(),
            composition: "bandish".to_string(),
            raag: "yaman".to_string(),
            taal: "teentaal".to_string(),
            description: "Disciple of the Gwalior gharana performing a traditional evening piece"
                .to_string(),
        }
    }

    fn font() -> PathBuf {
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf")
    }

    #[test]
    fn test_wrap_description() {
        let lines = wrap_description("one two three four five six seven eight nine ten", 9);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two three four five six seven eight nine");
        assert_eq!(lines[1], "ten");
    }

    #[test]
    fn test_wrap_description_blank() {
        assert!(wrap_description("", 9).is_empty());
        assert!(wrap_description("   ", 9).is_empty());
    }

    #[test]
    fn test_escape_drawtext() {
        assert_eq!(escape_drawtext("it's"), "it\\'s");
        assert_eq!(escape_drawtext("a:b"), "a\\:b");
        assert_eq!(escape_drawtext("a,b"), "a\\,b");
        assert_eq!(escape_drawtext("50%"), "50\\%");
        assert_eq!(escape_drawtext("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_card_filter_contains_all_fields() {
        let filter = build_card_filter(&record(), &font(), &EncodingConfig::default());

        assert!(filter.contains("Chirag Agarwal"));
        assert!(filter.contains("(London)"));
        assert!(filter.contains("Bandish"));
        assert!(filter.contains("Raag Yaman"));
        assert!(filter.contains("(Teentaal)"));
        assert!(filter.contains("Disciple"));
        assert!(filter.contains("fontfile="));
        assert!(filter.contains("x=(w-text_w)/2"));
    }

    #[test]
    fn test_card_filter_long_description_wraps() {
        let mut r = record();
        r.description = (0..20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let filter = build_card_filter(&r, &font(), &EncodingConfig::default());

        // 20 words at 9 per line is 3 description lines plus 5 field lines
        let count = filter.matches("drawtext=").count();
        assert_eq!(count, 8);
    }

    #[test]
    fn test_card_filter_empty_description_draws_nothing_for_it() {
        let mut r = record();
        r.description = String::new();
        let filter = build_card_filter(&r, &font(), &EncodingConfig::default());

        let count = filter.matches("drawtext=").count();
        assert_eq!(count, 5);
        assert!(!filter.contains("text='':"));
    }

    #[test]
    fn test_card_filter_is_deterministic() {
        let a = build_card_filter(&record(), &font(), &EncodingConfig::default());
        let b = build_card_filter(&record(), &font(), &EncodingConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_card_filter_escapes_apostrophes() {
        let mut r = record();
        r.name = "D'Souza".to_string();
        let filter = build_card_filter(&r, &font(), &EncodingConfig::default());
        assert!(filter.contains("D\\'souza"));
    }
}
