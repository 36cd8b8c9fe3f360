//! Palette-indexed image grids

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::palette::{ColorCode, ExtendedColorTable, Palette};
use crate::quantize::dither::map_dithered;
use crate::quantize::nearest::map_nearest;
use image::{Rgb, RgbImage};
use ndarray::{Array2, Axis, Slice};

/// Grid of palette positions paired with the palette they index
///
/// The grid is stored as `(rows, cols)`, i.e. `(height, width)`. Every index is
/// below the palette length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    indices: Array2<u8>,
    palette: Palette,
}

/// Map an image onto the nearest colors of a table
///
/// Returns a `(height, width)` grid of table indices.
pub fn quantize_to_table(image: &RgbImage, table: &ExtendedColorTable, dither: bool) -> Array2<u8> {
    if dither {
        map_dithered(image, table)
    } else {
        map_nearest(image, table)
    }
}

/// Quantize an image against a palette
///
/// # Errors
///
/// Returns an error if the palette cannot be extended into a color table
pub fn quantize(image: &RgbImage, palette: &Palette, dither: bool) -> Result<QuantizedImage> {
    let table = palette.table()?;
    let indices = quantize_to_table(image, &table, dither);
    QuantizedImage::new(indices, palette.clone())
}

impl QuantizedImage {
    /// Pair an index grid with its palette
    ///
    /// # Errors
    ///
    /// Returns an error if any index falls outside the palette
    pub fn new(indices: Array2<u8>, palette: Palette) -> Result<Self> {
        if let Some(&bad) = indices
            .iter()
            .find(|&&index| usize::from(index) >= palette.len())
        {
            return Err(invalid_parameter(
                "indices",
                &bad,
                &format!(
                    "palette '{}' only has {} colors",
                    palette.name(),
                    palette.len()
                ),
            ));
        }
        Ok(Self { indices, palette })
    }

    /// Width in cells
    pub fn width(&self) -> u32 {
        self.indices.ncols() as u32
    }

    /// Height in cells
    pub fn height(&self) -> u32 {
        self.indices.nrows() as u32
    }

    /// `(width, height)` in cells
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Index grid as `(rows, cols)`
    pub const fn indices(&self) -> &Array2<u8> {
        &self.indices
    }

    /// Palette the indices refer to
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette position at a cell
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        self.indices.get((y as usize, x as usize)).copied()
    }

    /// Color code at a cell
    pub fn code_at(&self, x: u32, y: u32) -> Option<ColorCode> {
        self.index_at(x, y)
            .and_then(|index| self.palette.code(usize::from(index)))
    }

    /// Keep the top-left `width` x `height` cells
    ///
    /// # Errors
    ///
    /// Returns an error if the requested size exceeds the grid
    pub fn crop(&self, width: u32, height: u32) -> Result<Self> {
        if width > self.width() || height > self.height() {
            return Err(MosaicError::InvalidGeometry {
                width: self.width(),
                height: self.height(),
                reason: format!("cannot crop to {width}x{height}"),
            });
        }
        let indices = self
            .indices
            .slice_each_axis(|axis| {
                let end = if axis.axis == Axis(0) { height } else { width };
                Slice::from(..end as usize)
            })
            .to_owned();
        Ok(Self {
            indices,
            palette: self.palette.clone(),
        })
    }

    /// Rewrite every index through a lookup array in one pass
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping produces an index outside the palette
    pub fn remap(&self, mapping: &[u8; 256]) -> Result<Self> {
        let indices = self
            .indices
            .mapv(|index| mapping.get(usize::from(index)).copied().unwrap_or(index));
        Self::new(indices, self.palette.clone())
    }

    /// Render the palette colors as an RGB image
    pub fn to_rgb_image(&self) -> RgbImage {
        let colors: Vec<Rgb<u8>> = (0..self.palette.len())
            .map(|index| Rgb(self.palette.rgb(index).unwrap_or([0, 0, 0])))
            .collect();
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            self.index_at(x, y)
                .and_then(|index| colors.get(usize::from(index)).copied())
                .unwrap_or(Rgb([0, 0, 0]))
        })
    }
}
