//! Preset enhancement combinations used for side-by-side previews

use crate::enhance::adjust::Adjustment;
use crate::io::configuration::PRESET_COUNT;
use crate::io::error::{MosaicError, Result};
use image::RgbImage;

/// Titles of the presets, by effect index
pub const PRESET_TITLES: [&str; PRESET_COUNT] = [
    "Original image",
    "Very high contrast",
    "Low brightness, high contrast",
    "High brightness, high contrast",
    "Low saturation, high contrast",
    "High saturation, high contrast",
    "Low saturation",
    "High saturation",
    "High brightness",
    "High contrast",
];

/// Enhancement steps of a preset, applied in order
///
/// Factors are absolute (1.0 is identity) and scale with `factor`.
///
/// # Errors
///
/// Returns [`MosaicError::UnknownEffectIndex`] if `effect` is not below [`PRESET_COUNT`]
pub fn preset_steps(effect: usize, factor: f32) -> Result<Vec<(Adjustment, f32)>> {
    let more = 1.0 + factor;
    let less = factor.mul_add(-0.5, 1.0);
    let contrast = (Adjustment::Contrast, more);

    let steps = match effect {
        0 => vec![],
        1 => vec![(Adjustment::Contrast, factor.mul_add(2.0, 1.0))],
        2 => vec![contrast, (Adjustment::Brightness, factor.mul_add(-0.2, 1.0))],
        3 => vec![contrast, (Adjustment::Brightness, more)],
        4 => vec![contrast, (Adjustment::Color, less)],
        5 => vec![contrast, (Adjustment::Color, more)],
        6 => vec![(Adjustment::Color, less)],
        7 => vec![(Adjustment::Color, more)],
        8 => vec![(Adjustment::Brightness, more)],
        9 => vec![contrast],
        _ => {
            return Err(MosaicError::UnknownEffectIndex {
                index: effect,
                max: PRESET_COUNT - 1,
            });
        }
    };
    Ok(steps)
}

/// Apply a single preset
///
/// # Errors
///
/// Returns [`MosaicError::UnknownEffectIndex`] for an unsupported effect
pub fn apply_preset(image: &RgbImage, effect: usize, factor: f32) -> Result<RgbImage> {
    let steps = preset_steps(effect, factor)?;
    Ok(steps
        .into_iter()
        .fold(image.clone(), |current, (adjustment, magnitude)| {
            adjustment.apply(&current, magnitude)
        }))
}

/// All presets of an image, indexed by effect
///
/// Contrast-based presets share one contrast pass.
pub fn default_preview(image: &RgbImage, factor: f32) -> Vec<RgbImage> {
    let more = 1.0 + factor;
    let less = factor.mul_add(-0.5, 1.0);
    let contrast_more = Adjustment::Contrast.apply(image, more);

    vec![
        image.clone(),
        Adjustment::Contrast.apply(image, factor.mul_add(2.0, 1.0)),
        Adjustment::Brightness.apply(&contrast_more, factor.mul_add(-0.2, 1.0)),
        Adjustment::Brightness.apply(&contrast_more, more),
        Adjustment::Color.apply(&contrast_more, less),
        Adjustment::Color.apply(&contrast_more, more),
        Adjustment::Color.apply(image, less),
        Adjustment::Color.apply(image, more),
        Adjustment::Brightness.apply(image, more),
        contrast_more,
    ]
}

/// Title of a preset including its effect index
///
/// # Errors
///
/// Returns [`MosaicError::UnknownEffectIndex`] for an unsupported effect
pub fn preset_title(effect: usize) -> Result<String> {
    PRESET_TITLES
        .get(effect)
        .map(|title| format!("{title} (effect={effect})"))
        .ok_or(MosaicError::UnknownEffectIndex {
            index: effect,
            max: PRESET_COUNT - 1,
        })
}
