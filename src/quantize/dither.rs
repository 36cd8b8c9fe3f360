//! Floyd–Steinberg error diffusion onto an extended color table

use crate::palette::{ExtendedColorTable, RgbTriple};
use crate::quantize::nearest::nearest_index;
use image::RgbImage;
use ndarray::{Array2, Array3};

// (dx, dy, weight / 16)
const FLOYD_STEINBERG: [(isize, usize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Quantize with error diffusion, scanning rows left to right
///
/// Returns a `(height, width)` grid of table indices.
pub fn map_dithered(image: &RgbImage, table: &ExtendedColorTable) -> Array2<u8> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut working = Array3::<f32>::zeros((height, width, 3));
    for (x, y, pixel) in image.enumerate_pixels() {
        for (c, &channel) in pixel.0.iter().enumerate() {
            if let Some(value) = working.get_mut((y as usize, x as usize, c)) {
                *value = f32::from(channel);
            }
        }
    }

    let mut indices = Array2::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let wanted = current_color(&working, y, x);
            let index = nearest_index(table, wanted);
            let chosen = table.get(usize::from(index)).unwrap_or(wanted);
            if let Some(cell) = indices.get_mut((y, x)) {
                *cell = index;
            }

            for c in 0..3 {
                let actual = working.get((y, x, c)).copied().unwrap_or(0.0);
                let error = actual - f32::from(chosen.get(c).copied().unwrap_or(0));
                for &(dx, dy, weight) in &FLOYD_STEINBERG {
                    let Some(nx) = x.checked_add_signed(dx) else {
                        continue;
                    };
                    if let Some(value) = working.get_mut((y + dy, nx, c)) {
                        *value += error * weight;
                    }
                }
            }
        }
    }
    indices
}

fn current_color(working: &Array3<f32>, y: usize, x: usize) -> RgbTriple {
    let mut color = [0u8; 3];
    for (c, slot) in color.iter_mut().enumerate() {
        let value = working.get((y, x, c)).copied().unwrap_or(0.0);
        *slot = value.round().clamp(0.0, 255.0) as u8;
    }
    color
}
