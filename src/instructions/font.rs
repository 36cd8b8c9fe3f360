//! Built-in 5x7 bitmap font for labels and titles

use image::{Rgb, RgbImage};

/// Glyph width in font pixels
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font pixels
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal gap between glyphs in font pixels
pub const GLYPH_SPACING: u32 = 1;

// Rows top to bottom, bit 4 is the leftmost column
const GLYPHS: &[(char, [u8; 7])] = &[
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04]),
    ('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('(', [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02]),
    (')', [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08]),
    ('=', [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08]),
    (':', [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
];

const UNKNOWN_GLYPH: [u8; 7] = [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04];

/// How text is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Output pixels per font pixel
    pub scale: u32,
    /// Fill color
    pub color: Rgb<u8>,
    /// Optional one font-pixel outline drawn behind the text
    pub outline: Option<Rgb<u8>>,
}

impl TextStyle {
    /// Plain text without outline
    pub const fn plain(color: Rgb<u8>, scale: u32) -> Self {
        Self {
            scale,
            color,
            outline: None,
        }
    }

    /// Black text with a white outline
    pub const fn label(scale: u32) -> Self {
        Self {
            scale,
            color: Rgb([0, 0, 0]),
            outline: Some(Rgb([255, 255, 255])),
        }
    }
}

/// Bitmap rows for a character; lowercase letters use their uppercase glyph
pub fn glyph(ch: char) -> [u8; 7] {
    let upper = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|&&(candidate, _)| candidate == upper)
        .map_or(UNKNOWN_GLYPH, |&(_, rows)| rows)
}

/// Width of rendered text in output pixels
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    (count * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
}

/// Height of rendered text in output pixels
pub const fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Draw text with its top-left corner at `(x, y)`; pixels off the canvas are clipped
pub fn draw_text(canvas: &mut RgbImage, text: &str, x: i64, y: i64, style: &TextStyle) {
    let scale = i64::from(style.scale.max(1));
    if let Some(outline) = style.outline {
        for (dx, dy) in [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ] {
            draw_glyphs(canvas, text, x + dx * scale, y + dy * scale, scale, outline);
        }
    }
    draw_glyphs(canvas, text, x, y, scale, style.color);
}

/// Draw text centered on `(cx, cy)`
pub fn draw_text_centered(canvas: &mut RgbImage, text: &str, cx: i64, cy: i64, style: &TextStyle) {
    let width = i64::from(text_width(text, style.scale.max(1)));
    let height = i64::from(text_height(style.scale.max(1)));
    draw_text(canvas, text, cx - width / 2, cy - height / 2, style);
}

fn draw_glyphs(canvas: &mut RgbImage, text: &str, x: i64, y: i64, scale: i64, color: Rgb<u8>) {
    let advance = i64::from(GLYPH_WIDTH + GLYPH_SPACING) * scale;
    for (position, ch) in (0i64..).zip(text.chars()) {
        let origin_x = x + position * advance;
        for (row, bits) in (0i64..).zip(glyph(ch)) {
            for column in 0..i64::from(GLYPH_WIDTH) {
                if bits & (1 << (GLYPH_WIDTH as i64 - 1 - column)) == 0 {
                    continue;
                }
                fill_block(
                    canvas,
                    origin_x + column * scale,
                    y + row * scale,
                    scale,
                    color,
                );
            }
        }
    }
}

fn fill_block(canvas: &mut RgbImage, x: i64, y: i64, size: i64, color: Rgb<u8>) {
    for py in y..y + size {
        for px in x..x + size {
            let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py)) else {
                continue;
            };
            if let Some(pixel) = canvas.get_pixel_mut_checked(px, py) {
                *pixel = color;
            }
        }
    }
}
