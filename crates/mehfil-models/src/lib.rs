//! Shared data models for the mehfil pipeline.
//!
//! This crate provides the types that flow between pipeline stages:
//! - Performer roster records and the clip filename convention
//! - Encoding configuration for the single target output format
//! - Text helpers shared by the title card renderer

pub mod encoding;
pub mod performer;
pub mod utils;

pub use encoding::EncodingConfig;
pub use performer::{PerformerRecord, REQUIRED_COLUMNS};
pub use utils::title_case;
