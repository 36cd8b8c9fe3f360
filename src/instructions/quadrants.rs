//! Quadrant planning for printable assembly instructions

use crate::io::configuration::{LARGE_UNIT, MAX_DIMENSION, MIN_DIMENSION, SMALL_UNIT};
use crate::io::error::{MosaicError, Result};

/// How an image splits into square assembly quadrants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantGeometry {
    /// Quadrants along the x axis
    pub quadrants_x: u32,
    /// Quadrants along the y axis
    pub quadrants_y: u32,
    /// Side of one quadrant in cells
    pub unit: u32,
}

/// One quadrant, numbered from 1 in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrant {
    /// Position in the printed sequence, starting at 1
    pub number: u32,
    /// Left edge in cells
    pub x: u32,
    /// Top edge in cells
    pub y: u32,
    /// Side in cells
    pub unit: u32,
}

/// Validate dimensions and derive the quadrant layout
///
/// Widths divisible by 50 use 50-cell quadrants, everything else 32-cell ones.
/// Remainder strips past the last whole quadrant are not covered.
///
/// # Errors
///
/// Returns [`MosaicError::InvalidGeometry`] if either side is outside
/// `[MIN_DIMENSION, MAX_DIMENSION]` or yields no whole quadrant
pub fn plan(width: u32, height: u32) -> Result<QuadrantGeometry> {
    let reject = |reason: String| MosaicError::InvalidGeometry {
        width,
        height,
        reason,
    };

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(reject(format!(
            "exceeds the {MAX_DIMENSION}px limit, resize the image"
        )));
    }
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(reject(format!(
            "smaller than {MIN_DIMENSION}px, resize the image"
        )));
    }

    let unit = if width % LARGE_UNIT == 0 {
        LARGE_UNIT
    } else {
        SMALL_UNIT
    };
    let geometry = QuadrantGeometry {
        quadrants_x: width / unit,
        quadrants_y: height / unit,
        unit,
    };

    if geometry.count() == 0 {
        return Err(reject(format!(
            "one side is shorter than the {unit}px quadrant"
        )));
    }
    Ok(geometry)
}

impl QuadrantGeometry {
    /// Total number of quadrants
    pub const fn count(&self) -> u32 {
        self.quadrants_x * self.quadrants_y
    }

    /// `(width, height)` covered by whole quadrants
    pub const fn covered_dimensions(&self) -> (u32, u32) {
        (self.quadrants_x * self.unit, self.quadrants_y * self.unit)
    }

    /// Quadrants in row-major order
    pub fn quadrants(&self) -> impl Iterator<Item = Quadrant> + '_ {
        (0..self.quadrants_y).flat_map(move |qy| {
            (0..self.quadrants_x).map(move |qx| Quadrant {
                number: qy * self.quadrants_x + qx + 1,
                x: qx * self.unit,
                y: qy * self.unit,
                unit: self.unit,
            })
        })
    }
}
