//! Nearest-color lookup against an extended color table

use crate::palette::{ExtendedColorTable, RgbTriple};
use image::RgbImage;
use ndarray::Array2;
use std::collections::HashMap;

/// Squared Euclidean distance between two RGB colors
pub fn squared_distance(a: RgbTriple, b: RgbTriple) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            (d * d) as u32
        })
        .sum()
}

/// Index of the closest table entry; the lowest index wins ties
pub fn nearest_index(table: &ExtendedColorTable, color: RgbTriple) -> u8 {
    let mut best = 0usize;
    let mut best_distance = u32::MAX;
    for (index, &candidate) in table.colors().iter().enumerate() {
        let distance = squared_distance(color, candidate);
        if distance < best_distance {
            best = index;
            best_distance = distance;
            if distance == 0 {
                break;
            }
        }
    }
    best as u8
}

/// Map every pixel to its nearest table entry without error diffusion
///
/// Returns a `(height, width)` grid of table indices.
pub fn map_nearest(image: &RgbImage, table: &ExtendedColorTable) -> Array2<u8> {
    let (width, height) = image.dimensions();
    let mut indices = Array2::zeros((height as usize, width as usize));
    // Photos repeat colors heavily once downscaled
    let mut memo: HashMap<RgbTriple, u8> = HashMap::new();

    for (x, y, pixel) in image.enumerate_pixels() {
        let index = *memo
            .entry(pixel.0)
            .or_insert_with(|| nearest_index(table, pixel.0));
        if let Some(cell) = indices.get_mut((y as usize, x as usize)) {
            *cell = index;
        }
    }
    indices
}
