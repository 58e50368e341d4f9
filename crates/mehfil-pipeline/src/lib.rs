//! Stage orchestration for the mehfil compilation pipeline.
//!
//! Wires the four stages together: roster loading, clip resolution, title
//! card rendering / clip normalization, and final concatenation. Data flows
//! strictly forward; the whole run is single-pass and sequential.

pub mod backend;
pub mod config;
pub mod error;
pub mod resolver;
pub mod run;

pub use backend::{FfmpegBackend, MediaBackend};
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use resolver::{resolve_clips, ResolvedPerformer};
pub use run::{assemble, run};
