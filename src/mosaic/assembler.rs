//! Full-resolution mosaic composition

use crate::io::error::{Result, invalid_parameter};
use crate::mosaic::overlay::OverlayLut;
use crate::palette::RgbTriple;
use crate::quantize::QuantizedImage;
use image::{RgbImage, imageops};
use std::collections::HashMap;

/// Replace every source pixel with a sprite tinted to its color
///
/// The output measures `(width * sprite_width, height * sprite_height)`. Tinted
/// sprites are cached per distinct color.
///
/// # Errors
///
/// Returns an error if the sprite is empty or the mosaic size overflows
pub fn assemble(source: &RgbImage, sprite: &RgbImage) -> Result<RgbImage> {
    let (sprite_width, sprite_height) = sprite.dimensions();
    if sprite_width == 0 || sprite_height == 0 {
        return Err(invalid_parameter(
            "sprite",
            &format!("{sprite_width}x{sprite_height}"),
            &"the tile sprite must not be empty",
        ));
    }

    let width = source
        .width()
        .checked_mul(sprite_width)
        .ok_or_else(|| invalid_parameter("mosaic width", &source.width(), &"too large"))?;
    let height = source
        .height()
        .checked_mul(sprite_height)
        .ok_or_else(|| invalid_parameter("mosaic height", &source.height(), &"too large"))?;

    let mut mosaic = RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    let mut tinted: HashMap<RgbTriple, RgbImage> = HashMap::new();

    for (x, y, pixel) in source.enumerate_pixels() {
        let tile = tinted
            .entry(pixel.0)
            .or_insert_with(|| OverlayLut::new(pixel.0).apply(sprite));
        imageops::replace(
            &mut mosaic,
            tile,
            i64::from(x * sprite_width),
            i64::from(y * sprite_height),
        );
    }
    Ok(mosaic)
}

/// Assemble the mosaic of a quantized image
///
/// # Errors
///
/// Returns an error if the sprite is empty or the mosaic size overflows
pub fn assemble_quantized(quantized: &QuantizedImage, sprite: &RgbImage) -> Result<RgbImage> {
    assemble(&quantized.to_rgb_image(), sprite)
}

/// Size a base image should be scaled to before assembly
///
/// With `size`, the longest side is fitted into `size` cells; without it, into
/// the sprite's own dimensions. Images already inside the bound are kept, and
/// neither side drops below 1.
pub fn mosaic_size(base: (u32, u32), sprite: (u32, u32), size: Option<u32>) -> (u32, u32) {
    let (scale_x, scale_y) = size.map_or(sprite, |s| (s, s));
    let (width, height) = base;
    if width <= scale_x && height <= scale_y {
        return base;
    }

    let scale = if width < height {
        f64::from(height) / f64::from(scale_y.max(1))
    } else {
        f64::from(width) / f64::from(scale_x.max(1))
    };
    let fit = |side: u32| ((f64::from(side) / scale).round() as u32).max(1);
    (fit(width), fit(height))
}
