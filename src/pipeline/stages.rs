//! Per-image processing stages
//!
//! `preprocess` turns a raw image into a cropped quantized grid,
//! `apply_replacement` runs the rare-color policy on it, and `finalize` turns
//! it into instruction sheets, a mosaic, a brick report and a ledger update.

use crate::enhance::{apply_adjustments, apply_preset};
use crate::instructions::{plan, render_instructions};
use crate::io::configuration::{INSTRUCTIONS_PREFIX, MOSAIC_PREFIX, MOSAIC_SUFFIX, REPORT_PREFIX};
use crate::io::error::Result;
use crate::io::image::{save_image, save_text, thumbnail};
use crate::ledger::{
    ColorCounts, LedgerStore, ReplaceOutcome, auto_replace, brick_report, manual_replace,
};
use crate::mosaic::{assemble, assemble_quantized, mosaic_size};
use crate::palette::{Palette, PaletteRegistry};
use crate::pipeline::config::{PipelineConfig, ReplaceMode};
use crate::quantize::{QuantizedImage, quantize};
use image::RgbImage;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// Enhance an image with custom deltas, or with the preset effect when all deltas are zero
///
/// # Errors
///
/// Returns an error if the preset effect index is unsupported
pub fn enhance(image: &RgbImage, config: &PipelineConfig) -> Result<RgbImage> {
    if config.adjustments.is_empty() {
        apply_preset(image, config.effect, config.factor)
    } else {
        apply_adjustments(image, &config.adjustments)
    }
}

/// Downscale and quantize an already enhanced image
///
/// # Errors
///
/// Returns an error if the palette is unknown
pub fn palette_thumbnail(
    image: &RgbImage,
    target_dimension: u32,
    palette: &Palette,
    dither: bool,
) -> Result<QuantizedImage> {
    quantize(&thumbnail(image, target_dimension), palette, dither)
}

/// Enhance, downscale, quantize and crop to whole quadrants
///
/// # Errors
///
/// Returns an error if the effect or palette is unknown, or the downscaled
/// image cannot be split into quadrants
pub fn preprocess(
    image: &RgbImage,
    config: &PipelineConfig,
    registry: &PaletteRegistry,
) -> Result<QuantizedImage> {
    let palette = registry.get(&config.palette)?;
    let enhanced = enhance(image, config)?;
    let quantized = palette_thumbnail(&enhanced, config.target_dimension, palette, config.dither)?;

    let geometry = plan(quantized.width(), quantized.height())?;
    let (width, height) = geometry.covered_dimensions();
    tracing::debug!(
        width,
        height,
        unit = geometry.unit,
        quadrants = geometry.count(),
        "Cropped to whole quadrants"
    );
    quantized.crop(width, height)
}

/// Apply the configured rare-color policy
///
/// # Errors
///
/// Returns an error if a code involved in the replacement is unknown
pub fn apply_replacement(
    quantized: &mut QuantizedImage,
    mode: &ReplaceMode,
    registry: &PaletteRegistry,
) -> Result<ReplaceOutcome> {
    match mode {
        ReplaceMode::Off => Ok(ReplaceOutcome::Unchanged),
        ReplaceMode::Automatic => auto_replace(quantized, registry),
        ReplaceMode::Manual(pairs) => {
            let rewritten = manual_replace(quantized, pairs)?;
            tracing::info!(pixels = rewritten, "Colors replaced");
            Ok(ReplaceOutcome::Applied {
                substitutions: pairs.clone(),
            })
        }
    }
}

/// Output locations for one image's instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Directory holding every output of the image
    pub directory: PathBuf,
    /// Source file stem
    pub stem: String,
}

impl OutputPaths {
    /// Outputs of `stem` under `<root>/<stem>/`
    pub fn new(root: &Path, stem: &str) -> Self {
        Self {
            directory: root.join(stem),
            stem: stem.to_string(),
        }
    }

    /// Instruction sheet of a quadrant
    pub fn quadrant(&self, number: u32) -> PathBuf {
        self.directory
            .join(format!("{number}_{INSTRUCTIONS_PREFIX}{}.png", self.stem))
    }

    /// Rendered mosaic
    pub fn mosaic(&self) -> PathBuf {
        self.directory
            .join(format!("{MOSAIC_PREFIX}{}.png", self.stem))
    }

    /// Brick count report
    pub fn report(&self) -> PathBuf {
        self.directory
            .join(format!("{REPORT_PREFIX}{}.txt", self.stem))
    }
}

/// Files written and counts recorded by [`finalize`]
#[derive(Debug, Clone)]
pub struct FinalizeSummary {
    /// Quadrant instruction sheets, in quadrant order
    pub sheets: Vec<PathBuf>,
    /// Rendered mosaic
    pub mosaic: PathBuf,
    /// Brick count report
    pub report: PathBuf,
    /// Bricks needed per color
    pub counts: ColorCounts,
}

/// Write instructions, mosaic and report, then add the counts to the ledger
///
/// Instructions are rendered first, so an image that cannot be split into
/// quadrants leaves the ledger untouched.
///
/// # Errors
///
/// Returns an error if the image cannot be split into quadrants, an output
/// cannot be written, or the ledger update fails
pub fn finalize(
    quantized: &QuantizedImage,
    sprite: &RgbImage,
    store: &mut dyn LedgerStore,
    paths: &OutputPaths,
) -> Result<FinalizeSummary> {
    let mut sheets = Vec::new();
    for sheet in render_instructions(quantized)? {
        let path = paths.quadrant(sheet.quadrant.number);
        tracing::info!(
            quadrant = sheet.quadrant.number,
            unit = sheet.quadrant.unit,
            image = %paths.stem,
            "Creating instructions"
        );
        save_image(&sheet.image, &path)?;
        sheets.push(path);
    }

    tracing::info!(image = %paths.stem, "Creating the final preview");
    let mosaic = assemble_quantized(quantized, sprite)?;
    let mosaic_path = paths.mosaic();
    save_image(&mosaic, &mosaic_path)?;

    tracing::info!(image = %paths.stem, "Recording brick quantities");
    let counts = ColorCounts::from_image(quantized);
    let report_path = paths.report();
    save_text(&brick_report(&counts), &report_path)?;
    store.merge(&counts)?;

    Ok(FinalizeSummary {
        sheets,
        mosaic: mosaic_path,
        report: report_path,
        counts,
    })
}

/// One-shot mosaic of an arbitrary image
///
/// The image is first scaled so its longest side fits `size` cells (or the
/// sprite size when `size` is `None`), then optionally quantized.
///
/// # Errors
///
/// Returns an error if quantization or assembly fails
pub fn legofy(
    image: &RgbImage,
    sprite: &RgbImage,
    size: Option<u32>,
    palette: Option<&Palette>,
    dither: bool,
) -> Result<RgbImage> {
    let (width, height) = mosaic_size(image.dimensions(), sprite.dimensions(), size);
    let base = if (width, height) == image.dimensions() {
        image.clone()
    } else {
        image::imageops::resize(image, width, height, FilterType::Lanczos3)
    };

    match palette {
        Some(palette) => assemble_quantized(&quantize(&base, palette, dither)?, sprite),
        None => assemble(&base, sprite),
    }
}

/// Default output path of a one-shot mosaic: `<stem>_lego.png` next to the source
pub fn legofy_output_path(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    source.with_file_name(format!("{stem}{MOSAIC_SUFFIX}.png"))
}
