//! Per-channel overlay transform used to tint the brick sprite

use crate::io::configuration::{
    OVERLAY_BRIGHT_THRESHOLD, OVERLAY_DARK_THRESHOLD, OVERLAY_EXTREME_OFFSET,
    OVERLAY_MIDTONE_OFFSET,
};
use crate::palette::RgbTriple;
use image::RgbImage;
use num_traits::clamp;

/// Overlay a sprite channel value `channel` onto a target value `overlay`
///
/// Near-black sprite values pull the target down by 100, near-white ones push
/// it up by 100, and midtones shift it linearly. Results are clamped to 0..=255.
pub fn overlay_value(channel: u8, overlay: u8) -> u8 {
    let overlay = i32::from(overlay);
    let value = if channel < OVERLAY_DARK_THRESHOLD {
        overlay - OVERLAY_EXTREME_OFFSET
    } else if channel > OVERLAY_BRIGHT_THRESHOLD {
        overlay + OVERLAY_EXTREME_OFFSET
    } else {
        overlay - OVERLAY_MIDTONE_OFFSET + i32::from(channel)
    };
    clamp(value, 0, 255) as u8
}

/// Lookup tables applying the overlay for one target color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLut {
    channels: [[u8; 256]; 3],
}

impl OverlayLut {
    /// Precompute the transform of every channel value towards `target`
    pub fn new(target: RgbTriple) -> Self {
        let mut channels = [[0u8; 256]; 3];
        for (table, &overlay) in channels.iter_mut().zip(target.iter()) {
            for (value, entry) in (0u8..=255).zip(table.iter_mut()) {
                *entry = overlay_value(value, overlay);
            }
        }
        Self { channels }
    }

    /// Transformed value of one channel
    pub fn lookup(&self, channel: usize, value: u8) -> u8 {
        self.channels
            .get(channel)
            .and_then(|table| table.get(usize::from(value)))
            .copied()
            .unwrap_or(value)
    }

    /// Recolor a whole sprite
    pub fn apply(&self, sprite: &RgbImage) -> RgbImage {
        let mut tinted = sprite.clone();
        for pixel in tinted.pixels_mut() {
            for (channel, value) in pixel.0.iter_mut().enumerate() {
                *value = self.lookup(channel, *value);
            }
        }
        tinted
    }
}

/// Recolor a sprite towards a target color
pub fn recolor(sprite: &RgbImage, target: RgbTriple) -> RgbImage {
    OverlayLut::new(target).apply(sprite)
}
