//! Labeled per-quadrant instruction sheets
//!
//! Each sheet shows one quadrant: every cell painted in its brick color with
//! the color code on top, axis numbers along the top and left edges, thin
//! gridlines between cells and heavier ones at half-unit intervals.

use crate::instructions::font::{TextStyle, draw_text_centered};
use crate::instructions::quadrants::{Quadrant, plan};
use crate::io::configuration::{LABEL_CELL_SIZE, LABEL_MARGIN, MAJOR_GRID_WIDTH};
use crate::io::error::Result;
use crate::quantize::QuantizedImage;
use image::{Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS_COLOR: Rgb<u8> = Rgb([90, 90, 90]);

/// Rendered instruction sheet for one quadrant
#[derive(Debug, Clone)]
pub struct QuadrantSheet {
    /// Quadrant the sheet shows
    pub quadrant: Quadrant,
    /// Rendered sheet
    pub image: RgbImage,
}

/// Render one quadrant of a quantized image
///
/// Cells outside the image are left blank.
pub fn render_quadrant(quantized: &QuantizedImage, quadrant: &Quadrant) -> RgbImage {
    let side = LABEL_MARGIN + quadrant.unit * LABEL_CELL_SIZE;
    let mut sheet = RgbImage::from_pixel(side, side, BACKGROUND);
    let palette = quantized.palette();

    for row in 0..quadrant.unit {
        for column in 0..quadrant.unit {
            let Some(index) = quantized.index_at(quadrant.x + column, quadrant.y + row) else {
                continue;
            };
            let color = palette.rgb(usize::from(index)).unwrap_or([0, 0, 0]);
            let left = LABEL_MARGIN + column * LABEL_CELL_SIZE;
            let top = LABEL_MARGIN + row * LABEL_CELL_SIZE;
            fill_rect(&mut sheet, left, top, LABEL_CELL_SIZE, LABEL_CELL_SIZE, Rgb(color));

            if let Some(code) = palette.code(usize::from(index)) {
                draw_text_centered(
                    &mut sheet,
                    &code.to_string(),
                    i64::from(left + LABEL_CELL_SIZE / 2),
                    i64::from(top + LABEL_CELL_SIZE / 2),
                    &TextStyle::label(1),
                );
            }
        }
    }

    draw_grid(&mut sheet, quadrant.unit);
    draw_axes(&mut sheet, quadrant.unit);
    sheet
}

/// Render every quadrant, in row-major order
///
/// # Errors
///
/// Returns an error if the image size is outside the printable range
pub fn render_instructions(quantized: &QuantizedImage) -> Result<Vec<QuadrantSheet>> {
    let geometry = plan(quantized.width(), quantized.height())?;
    Ok(geometry
        .quadrants()
        .map(|quadrant| QuadrantSheet {
            image: render_quadrant(quantized, &quadrant),
            quadrant,
        })
        .collect())
}

fn draw_grid(sheet: &mut RgbImage, unit: u32) {
    let extent = unit * LABEL_CELL_SIZE;
    let half = (unit / 2).max(1);

    for line in 0..=unit {
        let offset = LABEL_MARGIN + line * LABEL_CELL_SIZE;
        let major = line % half == 0;
        let width = if major { MAJOR_GRID_WIDTH } else { 1 };
        let start = offset.saturating_sub(width / 2).max(LABEL_MARGIN);

        fill_rect(sheet, start, LABEL_MARGIN, width, extent, GRID_COLOR);
        fill_rect(sheet, LABEL_MARGIN, start, extent, width, GRID_COLOR);
    }
}

fn draw_axes(sheet: &mut RgbImage, unit: u32) {
    let style = TextStyle::plain(AXIS_COLOR, 1);
    let center = i64::from(LABEL_MARGIN / 2);
    for cell in 0..unit {
        let label = (cell + 1).to_string();
        let along = i64::from(LABEL_MARGIN + cell * LABEL_CELL_SIZE + LABEL_CELL_SIZE / 2);
        draw_text_centered(sheet, &label, along, center, &style);
        draw_text_centered(sheet, &label, center, along, &style);
    }
}

fn fill_rect(sheet: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for py in y..y.saturating_add(height) {
        for px in x..x.saturating_add(width) {
            if let Some(pixel) = sheet.get_pixel_mut_checked(px, py) {
                *pixel = color;
            }
        }
    }
}
