//! Per-color pixel counts of a quantized image

use crate::io::configuration::{RARE_COLOR_LIMIT, TABLE_CAPACITY};
use crate::palette::{ColorCode, Palette};
use crate::quantize::QuantizedImage;
use bitvec::vec::BitVec;
use ndarray::Array2;

/// Count occurrences of every index in one pass over the buffer
pub fn histogram(indices: &Array2<u8>) -> [u64; TABLE_CAPACITY] {
    let mut bins = [0u64; TABLE_CAPACITY];
    for &index in indices {
        if let Some(bin) = bins.get_mut(usize::from(index)) {
            *bin += 1;
        }
    }
    bins
}

/// Pixel count per palette color, in palette order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCounts {
    codes: Vec<ColorCode>,
    counts: Vec<u64>,
}

impl ColorCounts {
    /// Count a quantized image against its palette
    pub fn from_image(image: &QuantizedImage) -> Self {
        Self::from_indices(image.indices(), image.palette())
    }

    /// Count an index grid against a palette
    pub fn from_indices(indices: &Array2<u8>, palette: &Palette) -> Self {
        let bins = histogram(indices);
        let codes: Vec<ColorCode> = palette.codes().collect();
        let counts = bins.iter().take(codes.len()).copied().collect();
        Self { codes, counts }
    }

    /// Count of a code, zero when the palette lacks it
    pub fn get(&self, code: ColorCode) -> u64 {
        self.iter()
            .find(|&(candidate, _)| candidate == code)
            .map_or(0, |(_, count)| count)
    }

    /// Count at a palette position
    pub fn at(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Every palette code with its count, including zeros
    pub fn iter(&self) -> impl Iterator<Item = (ColorCode, u64)> + '_ {
        self.codes.iter().copied().zip(self.counts.iter().copied())
    }

    /// Codes that appear at least once
    pub fn present(&self) -> impl Iterator<Item = (ColorCode, u64)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }

    /// Total number of counted pixels
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Palette positions used by fewer than [`RARE_COLOR_LIMIT`] pixels (but at least one)
    pub fn rare(&self) -> BitVec {
        self.counts
            .iter()
            .map(|&count| count > 0 && count < RARE_COLOR_LIMIT)
            .collect()
    }

    /// Codes of the rare positions, in palette order
    pub fn rare_codes(&self) -> Vec<ColorCode> {
        self.rare()
            .iter_ones()
            .filter_map(|index| self.codes.get(index).copied())
            .collect()
    }

    /// Codes used by exactly one pixel
    pub fn singletons(&self) -> Vec<ColorCode> {
        self.iter()
            .filter(|&(_, count)| count == 1)
            .map(|(code, _)| code)
            .collect()
    }
}
