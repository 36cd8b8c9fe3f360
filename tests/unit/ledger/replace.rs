//! Tests for automatic and manual color replacement

#[cfg(test)]
mod tests {
    use brickify::MosaicError;
    use brickify::ledger::{ColorCounts, ReplaceOutcome, auto_replace, manual_replace};
    use brickify::palette::PaletteRegistry;
    use brickify::quantize::QuantizedImage;
    use ndarray::Array2;

    // 8x8 image of `fill` with the listed cells overridden
    fn image_with(palette: &str, fill: u8, cells: &[(usize, u8)]) -> QuantizedImage {
        let registry = PaletteRegistry::new();
        let palette = registry.get(palette).expect("palette exists").clone();
        let mut values = vec![fill; 64];
        for &(position, value) in cells {
            if let Some(slot) = values.get_mut(position) {
                *slot = value;
            }
        }
        let indices = Array2::from_shape_vec((8, 8), values).expect("shape matches");
        QuantizedImage::new(indices, palette).expect("valid indices")
    }

    // Tests rare colors move to their substitute
    #[test]
    fn test_auto_replace_applies() {
        let registry = PaletteRegistry::new();
        let mut image = image_with("bw", 4, &[(0, 0), (9, 0)]);
        let outcome = auto_replace(&mut image, &registry).expect("replaces");

        assert_eq!(
            outcome,
            ReplaceOutcome::Applied {
                substitutions: vec![('A', 'B')]
            }
        );
        assert!(outcome.modified());
        let counts = ColorCounts::from_image(&image);
        assert_eq!(counts.get('A'), 0);
        assert_eq!(counts.get('B'), 2);
        assert_eq!(image.code_at(0, 0), Some('B'));
    }

    // Tests a pass that would leave a single-pixel color changes nothing
    // Verified by applying the substitution before the check
    #[test]
    fn test_auto_replace_skips_singletons() {
        let registry = PaletteRegistry::new();
        let mut image = image_with("bw", 4, &[(5, 0)]);
        let before = image.clone();
        let outcome = auto_replace(&mut image, &registry).expect("replaces");

        assert_eq!(
            outcome,
            ReplaceOutcome::Skipped {
                singletons: vec!['B']
            }
        );
        assert!(!outcome.modified());
        assert_eq!(image, before);
    }

    // Tests images without rare colors are untouched
    #[test]
    fn test_auto_replace_unchanged() {
        let registry = PaletteRegistry::new();
        let mut image = image_with("bw", 4, &[(0, 1), (1, 1), (2, 1)]);
        let before = image.clone();

        assert_eq!(
            auto_replace(&mut image, &registry).expect("replaces"),
            ReplaceOutcome::Unchanged
        );
        assert_eq!(image, before);
    }

    // Tests codes substituting to themselves are neither applied nor reported
    // Verified by recording the G to G substitution
    #[test]
    fn test_auto_replace_identity_substitute() {
        let registry = PaletteRegistry::new();
        // full: E is index 4, G is index 6 and substitutes to itself
        let mut image = image_with("full", 4, &[(0, 6), (1, 6)]);
        let before = image.clone();

        assert_eq!(
            auto_replace(&mut image, &registry).expect("replaces"),
            ReplaceOutcome::Unchanged
        );
        assert_eq!(image, before);

        let mut mixed = image_with("full", 4, &[(0, 6), (1, 6), (2, 0), (3, 0)]);
        assert_eq!(
            auto_replace(&mut mixed, &registry).expect("replaces"),
            ReplaceOutcome::Applied {
                substitutions: vec![('A', 'B')]
            }
        );
        assert_eq!(mixed.code_at(0, 0), Some('G'));
        assert_eq!(mixed.code_at(2, 0), Some('B'));
    }

    // Tests mutually substituting rare colors swap in one pass
    #[test]
    fn test_auto_replace_swap() {
        let registry = PaletteRegistry::new();
        let mut image = image_with("bw", 4, &[(0, 0), (1, 0), (2, 1), (3, 1)]);
        let outcome = auto_replace(&mut image, &registry).expect("replaces");

        assert!(outcome.modified());
        assert_eq!(image.code_at(0, 0), Some('B'));
        assert_eq!(image.code_at(2, 0), Some('A'));
    }

    // Tests substitutes missing from the image's palette fail
    #[test]
    fn test_auto_replace_substitute_outside_palette() {
        let registry = PaletteRegistry::new();
        // art: H K L M N O; H substitutes to I, which art lacks
        let mut image = image_with("art", 5, &[(0, 0), (1, 0)]);

        assert!(matches!(
            auto_replace(&mut image, &registry),
            Err(MosaicError::UnknownColorCode { code: 'I', .. })
        ));
    }

    // Tests manual replacement rewrites unconditionally
    #[test]
    fn test_manual_replace() {
        let mut image = image_with("bw", 4, &[(0, 0), (1, 0), (2, 0)]);
        let changed = manual_replace(&mut image, &[('A', 'C')]).expect("replaces");

        assert_eq!(changed, 3);
        let counts = ColorCounts::from_image(&image);
        assert_eq!(counts.get('A'), 0);
        assert_eq!(counts.get('C'), 3);

        let changed = manual_replace(&mut image, &[('D', 'A')]).expect("replaces");
        assert_eq!(changed, 0);
    }

    // Tests manual replacement with unknown codes
    #[test]
    fn test_manual_replace_unknown_code() {
        let mut image = image_with("bw", 4, &[]);

        assert!(manual_replace(&mut image, &[('E', 'L')]).is_err());
        assert!(manual_replace(&mut image, &[('Z', 'A')]).is_err());
    }
}
