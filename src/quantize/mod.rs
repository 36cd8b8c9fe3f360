//! Mapping images onto palette colors

/// Error diffusion quantization
pub mod dither;
/// Palette-indexed grids and the quantizer entry points
pub mod grid;
/// Nearest-color search
pub mod nearest;

pub use grid::{QuantizedImage, quantize, quantize_to_table};
