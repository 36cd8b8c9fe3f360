//! Tests for preset enhancement combinations

#[cfg(test)]
mod tests {
    use brickify::MosaicError;
    use brickify::enhance::presets::{PRESET_TITLES, preset_steps, preset_title};
    use brickify::enhance::{Adjustment, apply_preset, default_preview};
    use image::{Rgb, RgbImage};

    fn sample() -> RgbImage {
        RgbImage::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 120]))
    }

    // Tests preset 0 is the unmodified image
    #[test]
    fn test_preset_zero_identity() {
        let image = sample();

        assert_eq!(apply_preset(&image, 0, 0.8).expect("valid effect"), image);
        assert!(preset_steps(0, 0.5).expect("valid effect").is_empty());
    }

    // Tests preset step factors scale with the strength
    #[test]
    fn test_preset_steps() {
        let steps = preset_steps(1, 0.5).expect("valid effect");
        assert_eq!(steps, vec![(Adjustment::Contrast, 2.0)]);

        let steps = preset_steps(2, 0.5).expect("valid effect");
        assert_eq!(
            steps,
            vec![(Adjustment::Contrast, 1.5), (Adjustment::Brightness, 0.9)]
        );

        let steps = preset_steps(6, 0.5).expect("valid effect");
        assert_eq!(steps, vec![(Adjustment::Color, 0.75)]);
    }

    // Tests unsupported effects fail
    // Verified by accepting index 10
    #[test]
    fn test_unknown_effect() {
        assert!(matches!(
            apply_preset(&sample(), 10, 0.5),
            Err(MosaicError::UnknownEffectIndex { index: 10, max: 9 })
        ));
        assert!(preset_title(12).is_err());
    }

    // Tests the preview matches each preset applied individually
    #[test]
    fn test_default_preview_matches_presets() {
        let image = sample();
        let preview = default_preview(&image, 0.5);

        assert_eq!(preview.len(), PRESET_TITLES.len());
        for (effect, variant) in preview.iter().enumerate() {
            let expected = apply_preset(&image, effect, 0.5).expect("valid effect");
            assert_eq!(variant, &expected, "effect {effect}");
        }
    }

    // Tests titles carry the effect index
    #[test]
    fn test_preset_title() {
        assert_eq!(
            preset_title(9).expect("valid effect"),
            "High contrast (effect=9)"
        );
    }
}
