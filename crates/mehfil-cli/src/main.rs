//! Compilation video assembler.
//!
//! Reads `Performer Data.xlsx` from the working directory, renders a title
//! card for every roster row, and stitches cards and performer clips into
//! one `FINAL_VIDEO.mp4`. Runs with no required arguments.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mehfil_pipeline::{config, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "mehfil", version, about = "Assemble a compilation video from performer clips")]
struct Args {
    /// Directory holding the spreadsheet and performer clips
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Spreadsheet file (.xlsx or .xls), relative to --dir unless absolute
    #[arg(long, default_value = config::DEFAULT_SPREADSHEET)]
    spreadsheet: PathBuf,

    /// Output video file, relative to --dir unless absolute
    #[arg(long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Title card duration in seconds
    #[arg(long, default_value_t = config::DEFAULT_CARD_DURATION_SECS)]
    card_duration: f64,

    /// Bold font file for title cards; defaults to searching system fonts
    #[arg(long)]
    font: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mehfil=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = PipelineConfig {
        work_dir: args.dir,
        spreadsheet: args.spreadsheet,
        output: args.output,
        card_duration_secs: args.card_duration,
        font_path: args.font,
        ..Default::default()
    };

    info!(
        dir = %config.work_dir.display(),
        spreadsheet = %config.spreadsheet.display(),
        "Starting compilation run"
    );

    mehfil_pipeline::run(&config)
        .await
        .context("compilation run failed")?;

    Ok(())
}
