//! Assembly instructions split into printable quadrants

/// Bitmap font used for labels
pub mod font;
/// Quadrant geometry and size validation
pub mod quadrants;
/// Labeled quadrant sheet rendering
pub mod render;

pub use quadrants::{Quadrant, QuadrantGeometry, plan};
pub use render::{QuadrantSheet, render_instructions};
