//! Brick mosaic builder
//!
//! Images are enhanced, downscaled and quantized to a fixed brick palette,
//! split into printable instruction quadrants, rendered as a mosaic of tinted
//! brick sprites, and counted into a persistent brick inventory.

#![forbid(unsafe_code)]

/// Brightness, contrast, saturation and sharpness adjustments
pub mod enhance;
/// Quadrant planning and instruction sheet rendering
pub mod instructions;
/// Input/output operations and error handling
pub mod io;
/// Color counts, rare-color replacement and the brick inventory
pub mod ledger;
/// Mosaic assembly from a tinted brick sprite
pub mod mosaic;
/// Named brick palettes and color tables
pub mod palette;
/// Per-image processing stages and their configuration
pub mod pipeline;
/// Nearest-color and error diffusion quantization
pub mod quantize;

pub use io::error::{MosaicError, Result};
