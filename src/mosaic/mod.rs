//! Brick mosaic rendering

/// Mosaic composition from a tinted sprite
pub mod assembler;
/// Overlay tint transform
pub mod overlay;

pub use assembler::{assemble, assemble_quantized, mosaic_size};
pub use overlay::{OverlayLut, overlay_value, recolor};
