//! Tests for mosaic composition and sizing

#[cfg(test)]
mod tests {
    use brickify::mosaic::{assemble, assemble_quantized, mosaic_size};
    use brickify::palette::PaletteRegistry;
    use brickify::quantize::quantize;
    use image::{Rgb, RgbImage};

    fn neutral_sprite(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([133, 133, 133]))
    }

    // Tests output dimensions and per-cell placement
    // Verified by swapping the x and y offsets
    #[test]
    fn test_assemble_places_tiles() {
        let mut source = RgbImage::from_pixel(2, 1, Rgb([200, 10, 10]));
        source.put_pixel(1, 0, Rgb([10, 10, 200]));
        let mosaic = assemble(&source, &neutral_sprite(3, 2)).expect("assembles");

        assert_eq!(mosaic.dimensions(), (6, 2));
        assert_eq!(mosaic.get_pixel(0, 0), &Rgb([200, 10, 10]));
        assert_eq!(mosaic.get_pixel(2, 1), &Rgb([200, 10, 10]));
        assert_eq!(mosaic.get_pixel(3, 0), &Rgb([10, 10, 200]));
        assert_eq!(mosaic.get_pixel(5, 1), &Rgb([10, 10, 200]));
    }

    // Tests empty sprites are rejected
    #[test]
    fn test_assemble_empty_sprite() {
        let source = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));

        assert!(assemble(&source, &RgbImage::new(0, 4)).is_err());
    }

    // Tests quantized images assemble at sprite resolution
    #[test]
    fn test_assemble_quantized() {
        let registry = PaletteRegistry::new();
        let palette = registry.get("bw").expect("bw exists");
        let image = RgbImage::from_pixel(4, 3, Rgb([250, 250, 250]));
        let quantized = quantize(&image, palette, false).expect("quantizes");
        let mosaic = assemble_quantized(&quantized, &neutral_sprite(5, 5)).expect("assembles");

        assert_eq!(mosaic.dimensions(), (20, 15));
        assert!(mosaic.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    // Tests the longest side is fitted into the bound
    #[test]
    fn test_mosaic_size() {
        assert_eq!(mosaic_size((100, 50), (30, 30), None), (30, 15));
        assert_eq!(mosaic_size((100, 50), (30, 30), Some(10)), (10, 5));
        assert_eq!(mosaic_size((20, 40), (30, 30), Some(10)), (5, 10));
        assert_eq!(mosaic_size((5, 5), (30, 30), Some(10)), (5, 5));
        assert_eq!(mosaic_size((1000, 1), (30, 30), Some(10)), (10, 1));
    }
}
