//! Image enhancement applied before quantization

/// Ordered custom adjustments
pub mod adjust;
/// Preset adjustment combinations
pub mod presets;

pub use adjust::{Adjustment, Adjustments, apply_adjustments};
pub use presets::{apply_preset, default_preview};
