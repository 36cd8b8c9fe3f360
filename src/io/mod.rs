//! Input/output surfaces: files, command line, progress and logging

/// Per-file settings tables for bulk preprocessing
pub mod batch;
/// Command-line parsing and file orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image loading, saving and the built-in brick sprite
pub mod image;
/// Log subscriber setup
pub mod logging;
/// Preset preview sheets
pub mod preview;
/// Progress bars for multi-file runs
pub mod progress;
