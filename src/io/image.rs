//! Image loading, saving and resizing

use crate::io::configuration::BRICK_SIZE;
use crate::io::error::{MosaicError, Result, file_system_error, invalid_parameter};
use crate::palette::Palette;
use crate::quantize::{QuantizedImage, quantize};
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Load an image as RGB
///
/// `kind` names what the file is for in the missing-asset message.
///
/// # Errors
///
/// Returns [`MosaicError::MissingAsset`] if the file does not exist, or
/// [`MosaicError::ImageLoad`] if it cannot be decoded
pub fn load_image(path: &Path, kind: &'static str) -> Result<RgbImage> {
    if !path.is_file() {
        return Err(MosaicError::MissingAsset {
            kind,
            path: path.to_path_buf(),
        });
    }
    let image = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgb8())
}

/// Save an RGB image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be encoded
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a text file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn save_text(text: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).map_err(|e| file_system_error(path, "write file", e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }
    Ok(())
}

/// Downscale to fit a `max_dimension` square, preserving aspect ratio
///
/// Images already inside the square are returned unchanged.
pub fn thumbnail(image: &RgbImage, max_dimension: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_dimension && height <= max_dimension {
        return image.clone();
    }
    let max_dimension = max_dimension.max(1);
    let scale = f64::from(max_dimension) / f64::from(width.max(height));
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max_dimension);
    image::imageops::resize(image, fit(width), fit(height), FilterType::Lanczos3)
}

/// Reload a persisted quantized image
///
/// Persisted images carry exact palette colors, so re-quantizing them restores
/// the original indices. Pixels whose color is not in `palette` are rejected
/// instead of being snapped to a neighbor.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be decoded, or holds a
/// color outside the palette
pub fn load_quantized(path: &Path, palette: &Palette) -> Result<QuantizedImage> {
    let image = load_image(path, "Processed image")?;
    let quantized = quantize(&image, palette, false)?;

    let exact = quantized.to_rgb_image();
    let stray = image
        .enumerate_pixels()
        .zip(exact.pixels())
        .find(|((_, _, source), reloaded)| source != reloaded);
    if let Some(((x, y, Rgb([r, g, b])), _)) = stray {
        return Err(invalid_parameter(
            "processed image",
            &path.display(),
            &format!(
                "pixel ({x}, {y}) is #{r:02X}{g:02X}{b:02X}, which is not in palette '{}'",
                palette.name()
            ),
        ));
    }
    Ok(quantized)
}

/// Save a quantized image as its palette colors
///
/// # Errors
///
/// Returns an error if the image cannot be written
pub fn save_quantized(image: &QuantizedImage, path: &Path) -> Result<()> {
    save_image(&image.to_rgb_image(), path)
}

/// Built-in 1x1 brick sprite: a mid-gray plate with a shaded stud
///
/// Mid-gray keeps the overlay close to the target color, while the highlight
/// and shadow rings push towards white and black.
pub fn default_brick() -> RgbImage {
    let size = BRICK_SIZE;
    let center = f64::from(size) / 2.0 - 0.5;
    let radius = f64::from(size) * 0.3;

    RgbImage::from_fn(size, size, |x, y| {
        let edge = x == 0 || y == 0 || x == size - 1 || y == size - 1;
        if edge {
            return Rgb([60, 60, 60]);
        }
        let dx = f64::from(x) - center;
        let dy = f64::from(y) - center;
        let distance = dx.hypot(dy);
        if distance > radius + 1.0 {
            Rgb([133, 133, 133])
        } else if distance > radius {
            // Stud rim: lit from the top-left
            if dx + dy < 0.0 {
                Rgb([245, 245, 245])
            } else {
                Rgb([20, 20, 20])
            }
        } else {
            Rgb([150, 150, 150])
        }
    })
}
