//! End-to-end pipeline execution.
//!
//! Stage order: tool checks and font resolution (fail fast, before any
//! record-level work) → roster load → clip resolution (abort on first
//! missing file) → per record in roster order: title card render and clip
//! normalization → concat-demuxer assembly into a temporary path → atomic
//! publication of the final output. All intermediates live in a temp
//! directory that is removed when the run ends, success or not.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use mehfil_media::{check_ffmpeg, check_ffprobe, publish_output, resolve_font};
use mehfil_roster::load_roster;

use crate::backend::{FfmpegBackend, MediaBackend};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::resolver::{resolve_clips, ResolvedPerformer};

/// Run the whole pipeline with the real FFmpeg backend.
pub async fn run(config: &PipelineConfig) -> PipelineResult<()> {
    let started = Instant::now();

    check_ffmpeg()?;
    check_ffprobe()?;
    let font = resolve_font(config.font_path.as_deref())?;

    let records = load_roster(config.spreadsheet_path())?;
    if records.is_empty() {
        return Err(PipelineError::EmptyRoster);
    }

    let resolved = resolve_clips(&records, &config.work_dir)?;

    let backend = FfmpegBackend::new(font, config.encoding.clone(), config.card_duration_secs);
    assemble(&resolved, &backend, config).await?;

    info!(
        performers = resolved.len(),
        output = %config.output_path().display(),
        elapsed_secs = started.elapsed().as_secs(),
        "Final video is ready"
    );

    Ok(())
}

/// Render, normalize and concatenate the resolved performers in order.
///
/// Separated from [`run`] so tests can drive it with an injected backend
/// and hand-built records, without a spreadsheet or real media files.
pub async fn assemble(
    performers: &[ResolvedPerformer],
    backend: &dyn MediaBackend,
    config: &PipelineConfig,
) -> PipelineResult<()> {
    let workdir = tempfile::tempdir()?;
    let mut segments: Vec<PathBuf> = Vec::with_capacity(performers.len() * 2);

    for (i, performer) in performers.iter().enumerate() {
        let row = i + 1;
        let name = &performer.record.name;

        info!(row, performer = %name, "Processing performer");

        let card_path = workdir.path().join(format!("card_{:04}.mp4", i));
        backend
            .render_title_card(&performer.record, &card_path)
            .await
            .map_err(|e| PipelineError::record(row, name, e))?;

        let clip_path = workdir.path().join(format!("clip_{:04}.mp4", i));
        backend
            .normalize_clip(&performer.clip_path, &clip_path)
            .await
            .map_err(|e| PipelineError::record(row, name, e))?;

        segments.push(card_path);
        segments.push(clip_path);
    }

    // Assemble inside the temp dir; the final name only ever appears whole.
    let assembled = workdir.path().join("assembled.mp4");
    let list_path = workdir.path().join("segments.txt");
    backend
        .concatenate(&segments, &list_path, &assembled)
        .await?;

    publish_output(&assembled, config.output_path()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    use mehfil_media::{MediaError, MediaResult};
    use mehfil_models::PerformerRecord;

    fn record(name: &str) -> PerformerRecord {
        PerformerRecord {
            name: name.to_string(),
            location: "City".to_string(),
            composition: "C".to_string(),
            raag: "R".to_string(),
            taal: "T".to_string(),
            description: "D".to_string(),
        }
    }

    fn resolved(name: &str, dir: &Path) -> ResolvedPerformer {
        let record = record(name);
        let clip_path = dir.join(record.clip_filename());
        std::fs::write(&clip_path, b"clip").unwrap();
        ResolvedPerformer { record, clip_path }
    }

    /// Fake backend that records every call and writes marker files.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<String>>,
        concat_order: Mutex<Vec<String>>,
        fail_render_for: Option<String>,
    }

    #[async_trait]
    impl MediaBackend for FakeBackend {
        async fn render_title_card(
            &self,
            record: &PerformerRecord,
            output: &Path,
        ) -> MediaResult<()> {
            if self.fail_render_for.as_deref() == Some(record.name.as_str()) {
                return Err(MediaError::Render {
                    message: "fake render failure".to_string(),
                    stderr: None,
                });
            }
            self.calls
                .lock()
                .unwrap()
                .push(format!("card:{}", record.name));
            std::fs::write(output, b"card")?;
            Ok(())
        }

        async fn normalize_clip(&self, input: &Path, output: &Path) -> MediaResult<()> {
            self.calls.lock().unwrap().push(format!(
                "clip:{}",
                input.file_name().unwrap().to_string_lossy()
            ));
            std::fs::write(output, b"clip")?;
            Ok(())
        }

        async fn concatenate(
            &self,
            segments: &[PathBuf],
            _list_path: &Path,
            output: &Path,
        ) -> MediaResult<()> {
            self.calls.lock().unwrap().push("concat".to_string());
            *self.concat_order.lock().unwrap() = segments
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
                .collect();
            std::fs::write(output, b"final")?;
            Ok(())
        }
    }

    fn config(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            work_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_assemble_interleaves_cards_and_clips_in_roster_order() {
        let dir = TempDir::new().unwrap();
        let performers = vec![
            resolved("Asha Rao", dir.path()),
            resolved("Chirag Agarwal", dir.path()),
            resolved("Meera Iyer", dir.path()),
        ];
        let backend = FakeBackend::default();

        assemble(&performers, &backend, &config(dir.path()))
            .await
            .unwrap();

        let order = backend.concat_order.lock().unwrap().clone();
        assert_eq!(
            order,
            vec![
                "card_0000.mp4",
                "clip_0000.mp4",
                "card_0001.mp4",
                "clip_0001.mp4",
                "card_0002.mp4",
                "clip_0002.mp4",
            ]
        );

        // 2N segments for N performers
        assert_eq!(order.len(), performers.len() * 2);

        // Output published to the final name
        assert!(dir.path().join("FINAL_VIDEO.mp4").is_file());
    }

    #[tokio::test]
    async fn test_permuting_roster_permutes_processing_order() {
        let dir = TempDir::new().unwrap();
        let a = resolved("A", dir.path());
        let b = resolved("B", dir.path());

        let backend = FakeBackend::default();
        assemble(
            &[b.clone(), a.clone()],
            &backend,
            &config(dir.path()),
        )
        .await
        .unwrap();

        let calls = backend.calls.lock().unwrap().clone();
        let card_calls: Vec<_> = calls.iter().filter(|c| c.starts_with("card:")).collect();
        assert_eq!(card_calls, ["card:B", "card:A"]);
    }

    #[tokio::test]
    async fn test_render_failure_aborts_with_row_context() {
        let dir = TempDir::new().unwrap();
        let performers = vec![resolved("A", dir.path()), resolved("B", dir.path())];
        let backend = FakeBackend {
            fail_render_for: Some("B".to_string()),
            ..Default::default()
        };

        let err = assemble(&performers, &backend, &config(dir.path()))
            .await
            .unwrap_err();

        match err {
            PipelineError::Record { row, performer, .. } => {
                assert_eq!(row, 2);
                assert_eq!(performer, "B");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Concatenation never ran and no output appeared.
        let calls = backend.calls.lock().unwrap().clone();
        assert!(!calls.contains(&"concat".to_string()));
        assert!(!dir.path().join("FINAL_VIDEO.mp4").exists());
    }

    #[tokio::test]
    async fn test_failure_leaves_previous_output_untouched() {
        let dir = TempDir::new().unwrap();
        let previous = dir.path().join("FINAL_VIDEO.mp4");
        std::fs::write(&previous, b"previous run").unwrap();

        let performers = vec![resolved("A", dir.path())];
        let backend = FakeBackend {
            fail_render_for: Some("A".to_string()),
            ..Default::default()
        };

        assemble(&performers, &backend, &config(dir.path()))
            .await
            .unwrap_err();

        assert_eq!(std::fs::read(&previous).unwrap(), b"previous run");
    }
}
