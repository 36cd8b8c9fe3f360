//! Configuration and orchestration of the per-image stages

/// Consolidated configuration
pub mod config;
/// Preprocessing, replacement and finalization
pub mod stages;

pub use config::{PipelineConfig, ReplaceMode};
pub use stages::{OutputPaths, apply_replacement, finalize, preprocess};
