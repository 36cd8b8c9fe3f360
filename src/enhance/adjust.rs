//! Color, brightness, contrast and sharpness enhancements
//!
//! Every enhancement blends the image against a degenerate version of itself:
//! `out = degenerate + factor * (image - degenerate)`. A factor of 1 returns
//! the image, 0 returns the degenerate image, and larger factors extrapolate.

use crate::io::error::{MosaicError, Result};
use image::{Rgb, RgbImage};
use num_traits::clamp;

// 3x3 smoothing kernel; weights sum to SMOOTH_DIVISOR
const SMOOTH_KERNEL: [[u32; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];
const SMOOTH_DIVISOR: u32 = 13;

/// One enhancement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Saturation, blended against the grayscale image
    Color,
    /// Blended against black
    Brightness,
    /// Blended against a uniform gray at the mean luma
    Contrast,
    /// Blended against a smoothed copy
    Sharpness,
}

impl Adjustment {
    /// Order in which custom deltas are applied
    pub const ORDER: [Self; 4] = [Self::Color, Self::Brightness, Self::Contrast, Self::Sharpness];

    /// Apply the enhancement with an absolute factor (1.0 is identity)
    pub fn apply(self, image: &RgbImage, factor: f32) -> RgbImage {
        match self {
            Self::Color => enhance_color(image, factor),
            Self::Brightness => enhance_brightness(image, factor),
            Self::Contrast => enhance_contrast(image, factor),
            Self::Sharpness => enhance_sharpness(image, factor),
        }
    }
}

/// Custom enhancement deltas; each non-zero delta `d` applies factor `1 + d`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjustments {
    /// Saturation delta
    pub color: f32,
    /// Brightness delta
    pub brightness: f32,
    /// Contrast delta
    pub contrast: f32,
    /// Sharpness delta
    pub sharpness: f32,
}

impl Adjustments {
    /// Whether every delta is zero
    pub fn is_empty(&self) -> bool {
        self.deltas().iter().all(|&(_, delta)| delta == 0.0)
    }

    /// Deltas paired with their enhancement, in application order
    pub const fn deltas(&self) -> [(Adjustment, f32); 4] {
        [
            (Adjustment::Color, self.color),
            (Adjustment::Brightness, self.brightness),
            (Adjustment::Contrast, self.contrast),
            (Adjustment::Sharpness, self.sharpness),
        ]
    }
}

/// Apply custom deltas in the order color, brightness, contrast, sharpness
///
/// Zero deltas are skipped rather than applied as an identity blend.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyAdjustment`] if every delta is zero
pub fn apply_adjustments(image: &RgbImage, adjustments: &Adjustments) -> Result<RgbImage> {
    if adjustments.is_empty() {
        return Err(MosaicError::EmptyAdjustment);
    }

    let mut current = image.clone();
    for (adjustment, delta) in adjustments.deltas() {
        if delta != 0.0 {
            current = adjustment.apply(&current, 1.0 + delta);
        }
    }
    Ok(current)
}

/// ITU-R 601-2 luma in fixed point, rounded
pub fn luma(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let weighted = u32::from(r) * 19_595 + u32::from(g) * 38_470 + u32::from(b) * 7_471;
    ((weighted + 0x8000) >> 16) as u8
}

/// Saturation enhancement
pub fn enhance_color(image: &RgbImage, factor: f32) -> RgbImage {
    let mut gray = image.clone();
    for pixel in gray.pixels_mut() {
        let l = luma(*pixel);
        *pixel = Rgb([l, l, l]);
    }
    blend(&gray, image, factor)
}

/// Brightness enhancement
pub fn enhance_brightness(image: &RgbImage, factor: f32) -> RgbImage {
    let black = RgbImage::new(image.width(), image.height());
    blend(&black, image, factor)
}

/// Contrast enhancement around the rounded mean luma
pub fn enhance_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let count = u64::from(image.width()) * u64::from(image.height());
    let total: u64 = image.pixels().map(|&pixel| u64::from(luma(pixel))).sum();
    let mean = (total as f64 / count.max(1) as f64 + 0.5) as u8;
    let gray = RgbImage::from_pixel(image.width(), image.height(), Rgb([mean, mean, mean]));
    blend(&gray, image, factor)
}

/// Sharpness enhancement against a smoothed copy; the one-pixel border is not filtered
pub fn enhance_sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut smoothed = image.clone();

    if width > 2 && height > 2 {
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let mut sums = [0u32; 3];
                for (dy, row) in (0u32..).zip(SMOOTH_KERNEL.iter()) {
                    for (dx, &weight) in (0u32..).zip(row.iter()) {
                        let neighbor = image.get_pixel(x + dx - 1, y + dy - 1);
                        for (sum, &channel) in sums.iter_mut().zip(neighbor.0.iter()) {
                            *sum += weight * u32::from(channel);
                        }
                    }
                }
                let filtered = sums.map(|sum| ((sum + SMOOTH_DIVISOR / 2) / SMOOTH_DIVISOR) as u8);
                smoothed.put_pixel(x, y, Rgb(filtered));
            }
        }
    }

    blend(&smoothed, image, factor)
}

// Both images must share dimensions
fn blend(degenerate: &RgbImage, image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = image.clone();
    for (dst, (&low, &high)) in out.iter_mut().zip(degenerate.iter().zip(image.iter())) {
        *dst = mix(low, high, factor);
    }
    out
}

fn mix(low: u8, high: u8, factor: f32) -> u8 {
    let low = f32::from(low);
    let value = (f32::from(high) - low).mul_add(factor, low);
    clamp(value.round(), 0.0, 255.0) as u8
}
