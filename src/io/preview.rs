//! Side-by-side preview sheets of every preset effect

use crate::enhance::default_preview;
use crate::enhance::presets::preset_title;
use crate::instructions::font::{TextStyle, draw_text, text_height, text_width};
use crate::io::configuration::{
    LABEL_MARGIN, PREVIEW_COLUMNS, PREVIEW_PREFIX, PREVIEW_ROWS, PREVIEW_SCALE,
    PREVIEW_TITLE_HEIGHT,
};
use crate::io::error::Result;
use crate::io::image::thumbnail;
use crate::palette::PaletteRegistry;
use crate::quantize::quantize;
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const HEADER_SCALE: u32 = 2;

/// Render the ten presets of `image`, each downscaled to `size` and quantized
/// against `palette`, as a labeled 5x2 sheet
///
/// # Errors
///
/// Returns an error if the palette is unknown
pub fn render_preview_sheet(
    image: &RgbImage,
    size: u32,
    palette: &str,
    factor: f32,
    registry: &PaletteRegistry,
) -> Result<RgbImage> {
    let palette = registry.get(palette)?;

    let mut cells = Vec::new();
    for (effect, variant) in default_preview(image, factor).iter().enumerate() {
        let quantized = quantize(&thumbnail(variant, size), palette, false)?;
        let rgb = quantized.to_rgb_image();
        let scaled = image::imageops::resize(
            &rgb,
            rgb.width() * PREVIEW_SCALE,
            rgb.height() * PREVIEW_SCALE,
            FilterType::Nearest,
        );
        cells.push((preset_title(effect)?.to_uppercase(), scaled));
    }

    let cell_width = cells
        .iter()
        .map(|(title, image)| image.width().max(text_width(title, 1)))
        .max()
        .unwrap_or(0);
    let cell_height = PREVIEW_TITLE_HEIGHT
        + cells
            .iter()
            .map(|(_, image)| image.height())
            .max()
            .unwrap_or(0);
    let header_height = text_height(HEADER_SCALE) + LABEL_MARGIN;

    let width = LABEL_MARGIN + PREVIEW_COLUMNS * (cell_width + LABEL_MARGIN);
    let height = LABEL_MARGIN + header_height + PREVIEW_ROWS * (cell_height + LABEL_MARGIN);
    let mut sheet = RgbImage::from_pixel(width, height, BACKGROUND);

    let header = format!("PALETTE: {}", palette.name().to_uppercase());
    draw_text(
        &mut sheet,
        &header,
        i64::from(LABEL_MARGIN),
        i64::from(LABEL_MARGIN),
        &TextStyle::plain(INK, HEADER_SCALE),
    );

    let title_style = TextStyle::plain(INK, 1);
    for (slot, (title, image)) in (0u32..).zip(&cells) {
        let left = LABEL_MARGIN + (slot % PREVIEW_COLUMNS) * (cell_width + LABEL_MARGIN);
        let top = LABEL_MARGIN
            + header_height
            + (slot / PREVIEW_COLUMNS) * (cell_height + LABEL_MARGIN);

        draw_text(&mut sheet, title, i64::from(left), i64::from(top), &title_style);
        image::imageops::replace(
            &mut sheet,
            image,
            i64::from(left),
            i64::from(top + PREVIEW_TITLE_HEIGHT),
        );
    }

    Ok(sheet)
}

/// `<directory>/Previews_<PA>_<stem>.png`, `PA` being the first two letters of the palette
pub fn preview_path(directory: &Path, palette: &str, stem: &str) -> PathBuf {
    let tag: String = palette.chars().take(2).collect::<String>().to_uppercase();
    directory.join(format!("{PREVIEW_PREFIX}{tag}_{stem}.png"))
}
