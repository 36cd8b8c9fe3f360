//! Tests for palette-indexed grids

#[cfg(test)]
mod tests {
    use brickify::MosaicError;
    use brickify::palette::{Palette, PaletteRegistry};
    use brickify::quantize::{QuantizedImage, quantize};
    use image::{Rgb, RgbImage};
    use ndarray::Array2;

    fn bw() -> Palette {
        PaletteRegistry::new().get("bw").expect("bw exists").clone()
    }

    // Tests a white image quantizes to code E everywhere
    #[test]
    fn test_quantize_white_bw() {
        let image = RgbImage::from_pixel(5, 3, Rgb([255, 255, 255]));
        let quantized = quantize(&image, &bw(), false).expect("quantizes");

        assert_eq!(quantized.dimensions(), (5, 3));
        assert_eq!(quantized.code_at(4, 2), Some('E'));
        assert!(quantized.indices().iter().all(|&i| i == 4));
        assert_eq!(quantized.code_at(5, 0), None);
    }

    // Tests out-of-palette indices are rejected
    #[test]
    fn test_new_rejects_out_of_range() {
        let indices = Array2::from_elem((2, 2), 5u8);

        assert!(QuantizedImage::new(indices, bw()).is_err());
    }

    // Tests crop keeps the top-left region
    #[test]
    fn test_crop() {
        let indices = Array2::from_shape_fn((4, 6), |(y, x)| ((x + y) % 5) as u8);
        let quantized = QuantizedImage::new(indices, bw()).expect("valid indices");
        let cropped = quantized.crop(3, 2).expect("fits");

        assert_eq!(cropped.dimensions(), (3, 2));
        assert_eq!(cropped.index_at(2, 1), quantized.index_at(2, 1));
        assert!(matches!(
            quantized.crop(7, 2),
            Err(MosaicError::InvalidGeometry { .. })
        ));
    }

    // Tests crop limits rows by height and columns by width
    // Verified by swapping the axes of the crop
    #[test]
    fn test_crop_axes() {
        let indices = Array2::from_shape_fn((4, 6), |(y, x)| ((x * 2 + y) % 5) as u8);
        let quantized = QuantizedImage::new(indices, bw()).expect("valid indices");
        let cropped = quantized.crop(5, 3).expect("fits");

        assert_eq!(cropped.indices().dim(), (3, 5));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(cropped.index_at(x, y), quantized.index_at(x, y));
            }
        }
        assert!(quantized.crop(6, 5).is_err());
    }

    // Tests remap rewrites indices in one pass
    #[test]
    fn test_remap() {
        let indices = Array2::from_shape_vec((1, 3), vec![0u8, 1, 4]).expect("shape matches");
        let quantized = QuantizedImage::new(indices, bw()).expect("valid indices");
        let mut mapping = [0u8; 256];
        for (i, slot) in mapping.iter_mut().enumerate() {
            *slot = i as u8;
        }
        mapping[0] = 1;
        mapping[1] = 0;
        let remapped = quantized.remap(&mapping).expect("valid mapping");

        assert_eq!(remapped.indices().iter().copied().collect::<Vec<_>>(), vec![1, 0, 4]);

        mapping[4] = 200;
        assert!(quantized.remap(&mapping).is_err());
    }

    // Tests rendering palette colors and exact re-quantization
    // Verified by quantizing the rendered image against another palette
    #[test]
    fn test_requantize_roundtrip_is_exact() {
        let registry = PaletteRegistry::new();
        for name in ["bw", "solid", "art", "all"] {
            let palette = registry.get(name).expect("palette exists");
            let image = RgbImage::from_fn(10, 7, |x, y| {
                Rgb([(x * 25) as u8, (y * 36) as u8, ((x + y) * 15) as u8])
            });
            let quantized = quantize(&image, palette, true).expect("quantizes");
            let requantized =
                quantize(&quantized.to_rgb_image(), palette, false).expect("quantizes");

            assert_eq!(requantized, quantized, "palette {name}");
        }
    }
}
