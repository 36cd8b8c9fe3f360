//! Consolidated pipeline configuration

use crate::enhance::Adjustments;
use crate::io::configuration::{
    DEFAULT_EFFECT, DEFAULT_FACTOR, DEFAULT_PALETTE, DEFAULT_TARGET_DIMENSION,
};
use crate::io::error::{Result, invalid_parameter};
use crate::palette::ColorCode;

/// How rare colors are handled before finalizing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Leave colors as quantized
    #[default]
    Off,
    /// Substitute rare colors from the fixed substitution table
    Automatic,
    /// Rewrite colors through explicit `old → new` pairs
    Manual(Vec<(ColorCode, ColorCode)>),
}

/// Every setting that drives the processing of one image
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Largest side of the quantized image
    pub target_dimension: u32,
    /// Palette name
    pub palette: String,
    /// Use error diffusion while quantizing
    pub dither: bool,
    /// Custom enhancement deltas; preset `effect` is used when all are zero
    pub adjustments: Adjustments,
    /// Preset effect index
    pub effect: usize,
    /// Preset strength
    pub factor: f32,
    /// Rare-color handling
    pub replace: ReplaceMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_dimension: DEFAULT_TARGET_DIMENSION,
            palette: DEFAULT_PALETTE.to_string(),
            dither: false,
            adjustments: Adjustments::default(),
            effect: DEFAULT_EFFECT,
            factor: DEFAULT_FACTOR,
            replace: ReplaceMode::Off,
        }
    }
}

/// Parse `H=L,A=B` style replacement pairs
///
/// # Errors
///
/// Returns an error if a pair is not two single-letter codes joined by `=` or `:`
pub fn parse_replacements(spec: &str) -> Result<Vec<(ColorCode, ColorCode)>> {
    spec.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let invalid = || invalid_parameter("replace", &pair, &"expected OLD=NEW, e.g. H=L");
            let (from, to) = pair
                .split_once(['=', ':'])
                .ok_or_else(invalid)?;
            Ok((single_code(from).ok_or_else(invalid)?, single_code(to).ok_or_else(invalid)?))
        })
        .collect()
}

fn single_code(text: &str) -> Option<ColorCode> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Some(code.to_ascii_uppercase()),
        _ => None,
    }
}
