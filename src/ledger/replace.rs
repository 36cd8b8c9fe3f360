//! Rare-color substitution and manual color replacement

use crate::io::error::Result;
use crate::ledger::histogram::ColorCounts;
use crate::palette::{ColorCode, PaletteRegistry};
use crate::quantize::QuantizedImage;

/// Result of a replacement pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// No color was rare; the image is unchanged
    Unchanged,
    /// Rare colors were rewritten
    Applied {
        /// `(rare code, substitute)` pairs that were applied
        substitutions: Vec<(ColorCode, ColorCode)>,
    },
    /// Substitution would have left single-pixel colors; the image is unchanged
    Skipped {
        /// Codes that would have been used by exactly one pixel
        singletons: Vec<ColorCode>,
    },
}

impl ReplaceOutcome {
    /// Whether the image was modified and needs persisting
    pub const fn modified(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Rewrite every rare color to its fixed substitute
///
/// The pass is all or nothing: when any color would still be used by exactly
/// one pixel after substitution, `image` is left untouched and the outcome is
/// [`ReplaceOutcome::Skipped`]. The check covers every color in the
/// histogram, not only the substituted ones. Codes that substitute to
/// themselves are left out, and a pass with nothing else to rewrite is
/// [`ReplaceOutcome::Unchanged`].
///
/// # Errors
///
/// Returns an error if a rare code has no substitute, or the substitute is not
/// part of the image's palette
pub fn auto_replace(
    image: &mut QuantizedImage,
    registry: &PaletteRegistry,
) -> Result<ReplaceOutcome> {
    let counts = ColorCounts::from_image(image);
    let rare = counts.rare();
    if rare.not_any() {
        return Ok(ReplaceOutcome::Unchanged);
    }

    let palette = image.palette();
    let mut mapping = identity_mapping();
    let mut substitutions = Vec::new();
    for index in rare.iter_ones() {
        let Some(code) = palette.code(index) else {
            continue;
        };
        let substitute = registry.get_substitute(code)?;
        let target = palette.require_index(substitute)?;
        if target == index {
            continue;
        }
        if let Some(slot) = mapping.get_mut(index) {
            *slot = target as u8;
        }
        substitutions.push((code, substitute));
    }
    if substitutions.is_empty() {
        return Ok(ReplaceOutcome::Unchanged);
    }

    let candidate = image.remap(&mapping)?;
    let singletons = ColorCounts::from_image(&candidate).singletons();
    if !singletons.is_empty() {
        tracing::warn!(
            palette = palette.name(),
            singletons = ?singletons,
            "The replace operation was skipped"
        );
        return Ok(ReplaceOutcome::Skipped { singletons });
    }

    *image = candidate;
    Ok(ReplaceOutcome::Applied { substitutions })
}

/// Rewrite colors through an explicit `old → new` mapping, unconditionally
///
/// Returns the number of pixels rewritten.
///
/// # Errors
///
/// Returns an error if either side of a pair is not part of the image's palette
pub fn manual_replace(
    image: &mut QuantizedImage,
    replacements: &[(ColorCode, ColorCode)],
) -> Result<u64> {
    let palette = image.palette();
    let mut mapping = identity_mapping();
    for &(from, to) in replacements {
        let source = palette.require_index(from)?;
        let target = palette.require_index(to)?;
        if let Some(slot) = mapping.get_mut(source) {
            *slot = target as u8;
        }
    }

    let before = image.indices().clone();
    let rewritten = image.remap(&mapping)?;
    let changed = before
        .iter()
        .zip(rewritten.indices().iter())
        .filter(|(old, new)| old != new)
        .count() as u64;

    *image = rewritten;
    Ok(changed)
}

fn identity_mapping() -> [u8; 256] {
    let mut mapping = [0u8; 256];
    for (value, slot) in (0u8..=255).zip(mapping.iter_mut()) {
        *slot = value;
    }
    mapping
}
