//! Tests for preset preview sheets

#[cfg(test)]
mod tests {
    use brickify::MosaicError;
    use brickify::io::configuration::{LABEL_MARGIN, PREVIEW_COLUMNS, PREVIEW_ROWS};
    use brickify::io::preview::{preview_path, render_preview_sheet};
    use brickify::palette::PaletteRegistry;
    use image::{Rgb, RgbImage};
    use std::path::{Path, PathBuf};

    fn gradient() -> RgbImage {
        RgbImage::from_fn(40, 20, |x, y| Rgb([(x * 6) as u8, (y * 12) as u8, 90]))
    }

    // Tests the sheet holds every preset and only palette colors inside cells
    // Verified by dropping the last grid row
    #[test]
    fn test_render_preview_sheet() {
        let registry = PaletteRegistry::new();
        let sheet = render_preview_sheet(&gradient(), 10, "bw", 0.5, &registry).expect("renders");

        assert!(sheet.width() > PREVIEW_COLUMNS * (40 + LABEL_MARGIN));
        assert!(sheet.height() > PREVIEW_ROWS * (20 + LABEL_MARGIN));
        assert_eq!(sheet.get_pixel(0, 0), &Rgb([255, 255, 255]));

        let palette = registry.get("bw").expect("bw exists");
        let allowed: Vec<Rgb<u8>> = palette.entries().iter().map(|&(_, rgb)| Rgb(rgb)).collect();
        assert!(sheet.pixels().all(|pixel| allowed.contains(pixel)));
    }

    // Tests sheets of the same input are reproducible
    #[test]
    fn test_render_preview_sheet_deterministic() {
        let registry = PaletteRegistry::new();
        let first = render_preview_sheet(&gradient(), 12, "solid", 0.8, &registry).expect("renders");
        let second =
            render_preview_sheet(&gradient(), 12, "solid", 0.8, &registry).expect("renders");

        assert_eq!(first, second);
    }

    // Tests unknown palettes are rejected
    #[test]
    fn test_render_preview_unknown_palette() {
        let result = render_preview_sheet(&gradient(), 10, "neon", 0.5, &PaletteRegistry::new());

        assert!(matches!(result, Err(MosaicError::UnknownPalette { .. })));
    }

    // Tests sheet names carry the palette initials
    #[test]
    fn test_preview_path() {
        assert_eq!(
            preview_path(Path::new("previews/cat"), "art", "cat"),
            PathBuf::from("previews/cat/Previews_AR_cat.png")
        );
        assert_eq!(
            preview_path(Path::new("p"), "bw", "dog"),
            PathBuf::from("p/Previews_BW_dog.png")
        );
    }
}
