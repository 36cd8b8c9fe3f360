//! Per-file settings for bulk preprocessing
//!
//! The batch file is a comma-separated table keyed by source file name:
//!
//! ```text
//! file,max_size,effect,palette_mode,factor,color,brightness,contrast,sharpness
//! cat.jpg,64,1,solid,0.8,,,,
//! dog.png,100,,portrait,,1,0,1,0
//! ```
//!
//! Empty cells default to zero, a zero `max_size` falls back to the default
//! target dimension, and the four enhancement deltas are truncated to integers.
//! `max_size` and `effect` must be non-negative integers, and `effect` must
//! name one of the presets.

use crate::enhance::Adjustments;
use crate::io::configuration::{DEFAULT_PALETTE, DEFAULT_TARGET_DIMENSION, PRESET_COUNT};
use crate::io::error::{MosaicError, Result, file_system_error};
use crate::pipeline::config::PipelineConfig;
use std::path::Path;

const COLUMNS: [&str; 8] = [
    "max_size",
    "effect",
    "palette_mode",
    "factor",
    "color",
    "brightness",
    "contrast",
    "sharpness",
];

/// Settings for one source file
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Source file name, relative to the raw image directory
    pub file_name: String,
    /// Largest side of the quantized image
    pub max_size: u32,
    /// Preset effect index
    pub effect: usize,
    /// Palette name
    pub palette: String,
    /// Preset strength
    pub factor: f32,
    /// Custom enhancement deltas
    pub adjustments: Adjustments,
}

impl BatchEntry {
    /// Pipeline configuration for this entry, other settings taken from `base`
    pub fn to_config(&self, base: &PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            target_dimension: if self.max_size == 0 {
                DEFAULT_TARGET_DIMENSION
            } else {
                self.max_size
            },
            palette: self.palette.clone(),
            effect: self.effect,
            factor: self.factor,
            adjustments: self.adjustments,
            ..base.clone()
        }
    }
}

/// Read and parse a batch file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed
pub fn load_batch(path: &Path) -> Result<Vec<BatchEntry>> {
    if !path.is_file() {
        return Err(MosaicError::MissingAsset {
            kind: "Batch file",
            path: path.to_path_buf(),
        });
    }
    let text =
        std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read batch file", e))?;
    parse_batch(&text, path)
}

/// Parse batch file contents; `source` is only used in error messages
///
/// # Errors
///
/// Returns [`MosaicError::MalformedTable`] for a missing header, unknown
/// columns or unparsable values, and [`MosaicError::UnknownEffectIndex`] for
/// an effect past the last preset
pub fn parse_batch(text: &str, source: &Path) -> Result<Vec<BatchEntry>> {
    let malformed = |line: usize, reason: String| MosaicError::MalformedTable {
        path: source.to_path_buf(),
        line,
        reason,
    };

    let mut lines = (1..).zip(text.lines()).filter(|(_, line)| !line.trim().is_empty());
    let (_, header) = lines
        .next()
        .ok_or_else(|| malformed(1, "missing header row".to_string()))?;
    let header = split_row(header);

    let mut positions = [None; COLUMNS.len()];
    for (position, name) in header.iter().enumerate().skip(1) {
        let slot = COLUMNS
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
            .and_then(|column| positions.get_mut(column))
            .ok_or_else(|| malformed(1, format!("unknown column '{name}'")))?;
        *slot = Some(position);
    }

    let mut entries = Vec::new();
    for (number, line) in lines {
        let cells = split_row(line);
        let cell = |column: usize| {
            positions
                .get(column)
                .copied()
                .flatten()
                .and_then(|position| cells.get(position))
                .map_or("", String::as_str)
        };
        let number_at = |column: usize| -> Result<f64> {
            let raw = cell(column);
            if raw.is_empty() {
                return Ok(0.0);
            }
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    malformed(
                        number,
                        format!("'{raw}' is not a number in column '{}'", column_name(column)),
                    )
                })
        };

        let whole_at = |column: usize| -> Result<u32> {
            let value = number_at(column)?;
            if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
                return Err(malformed(
                    number,
                    format!(
                        "'{}' is not a non-negative integer in column '{}'",
                        cell(column),
                        column_name(column)
                    ),
                ));
            }
            Ok(value as u32)
        };

        let file_name = cells.first().cloned().unwrap_or_default();
        if file_name.is_empty() {
            return Err(malformed(number, "missing file name".to_string()));
        }

        let effect = whole_at(1)? as usize;
        if effect >= PRESET_COUNT {
            return Err(MosaicError::UnknownEffectIndex {
                index: effect,
                max: PRESET_COUNT - 1,
            });
        }

        let palette = cell(2);
        entries.push(BatchEntry {
            file_name,
            max_size: whole_at(0)?,
            effect,
            palette: if palette.is_empty() {
                DEFAULT_PALETTE.to_string()
            } else {
                palette.to_string()
            },
            factor: number_at(3)? as f32,
            adjustments: Adjustments {
                color: number_at(4)?.trunc() as f32,
                brightness: number_at(5)?.trunc() as f32,
                contrast: number_at(6)?.trunc() as f32,
                sharpness: number_at(7)?.trunc() as f32,
            },
        });
    }
    Ok(entries)
}

fn column_name(column: usize) -> &'static str {
    COLUMNS.get(column).copied().unwrap_or("?")
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}
