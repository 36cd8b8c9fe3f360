//! Palette definitions and color table construction

/// Named palettes, merged palette and substitution table
pub mod registry;
/// Fixed-capacity color tables for quantization
pub mod table;

pub use registry::{ColorCode, MERGED_PALETTE, Palette, PaletteRegistry, RgbTriple};
pub use table::ExtendedColorTable;
