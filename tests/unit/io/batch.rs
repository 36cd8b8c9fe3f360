//! Tests for batch table parsing

#[cfg(test)]
mod tests {
    use brickify::MosaicError;
    use brickify::enhance::Adjustments;
    use brickify::io::batch::{BatchEntry, load_batch, parse_batch};
    use brickify::io::configuration::{DEFAULT_PALETTE, DEFAULT_TARGET_DIMENSION};
    use brickify::pipeline::{PipelineConfig, ReplaceMode};
    use std::fs;
    use std::path::Path;

    const TABLE: &str = "\
file,max_size,effect,palette_mode,factor,color,brightness,contrast,sharpness
cat.jpg,100,1,portrait,0.8,,,,
dog.png,,,,,1.7,0,-1.2,0
";

    // Tests empty cells default to zero and deltas are truncated
    // Verified by rounding the deltas instead of truncating
    #[test]
    fn test_parse_batch() {
        let entries = parse_batch(TABLE, Path::new("pipeline.csv")).expect("valid table");

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.first(),
            Some(&BatchEntry {
                file_name: "cat.jpg".to_string(),
                max_size: 100,
                effect: 1,
                palette: "portrait".to_string(),
                factor: 0.8,
                adjustments: Adjustments::default(),
            })
        );

        let dog = entries.get(1).expect("second row");
        assert_eq!(dog.max_size, 0);
        assert_eq!(dog.palette, DEFAULT_PALETTE);
        assert_eq!(dog.factor, 0.0);
        assert_eq!(
            dog.adjustments,
            Adjustments {
                color: 1.0,
                brightness: 0.0,
                contrast: -1.0,
                sharpness: 0.0
            }
        );
    }

    // Tests columns are matched by header name in any order
    #[test]
    fn test_parse_batch_column_order() {
        let text = "file,palette_mode,max_size\nbird.png,art,50\n";
        let entries = parse_batch(text, Path::new("pipeline.csv")).expect("valid table");

        assert_eq!(entries.first().map(|e| e.max_size), Some(50));
        assert_eq!(entries.first().map(|e| e.palette.as_str()), Some("art"));
    }

    // Tests malformed tables
    #[test]
    fn test_parse_batch_malformed() {
        let source = Path::new("pipeline.csv");

        assert!(matches!(
            parse_batch("", source),
            Err(MosaicError::MalformedTable { line: 1, .. })
        ));
        assert!(parse_batch("file,colour\na.png,1\n", source).is_err());
        assert!(matches!(
            parse_batch("file,effect\na.png,strong\n", source),
            Err(MosaicError::MalformedTable { line: 2, .. })
        ));
        assert!(parse_batch("file,effect\n,1\n", source).is_err());
    }

    // Tests negative, fractional and out-of-range effects are rejected
    // Verified by clamping the effect cell at zero
    #[test]
    fn test_parse_batch_rejects_bad_effect() {
        let source = Path::new("pipeline.csv");

        assert!(matches!(
            parse_batch("file,effect\na.png,-1\n", source),
            Err(MosaicError::MalformedTable { line: 2, .. })
        ));
        assert!(matches!(
            parse_batch("file,effect\na.png,2.7\n", source),
            Err(MosaicError::MalformedTable { line: 2, .. })
        ));
        assert!(matches!(
            parse_batch("file,effect\na.png,10\n", source),
            Err(MosaicError::UnknownEffectIndex { index: 10, max: 9 })
        ));
        assert!(matches!(
            parse_batch("file,max_size\na.png,-64\n", source),
            Err(MosaicError::MalformedTable { line: 2, .. })
        ));

        let entries = parse_batch("file,effect\na.png,9.0\n", source).expect("valid table");
        assert_eq!(entries.first().map(|e| e.effect), Some(9));
    }

    // Tests entries override the base configuration
    #[test]
    fn test_to_config() {
        let entries = parse_batch(TABLE, Path::new("pipeline.csv")).expect("valid table");
        let base = PipelineConfig {
            dither: true,
            replace: ReplaceMode::Automatic,
            ..PipelineConfig::default()
        };

        let cat = entries.first().expect("first row").to_config(&base);
        assert_eq!(cat.target_dimension, 100);
        assert_eq!(cat.palette, "portrait");
        assert_eq!(cat.effect, 1);
        assert!(cat.dither);
        assert_eq!(cat.replace, ReplaceMode::Automatic);

        let dog = entries.get(1).expect("second row").to_config(&base);
        assert_eq!(dog.target_dimension, DEFAULT_TARGET_DIMENSION);
    }

    // Tests loading from disk and missing files
    #[test]
    fn test_load_batch() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pipeline.csv");

        assert!(matches!(
            load_batch(&path),
            Err(MosaicError::MissingAsset { .. })
        ));

        fs::write(&path, TABLE).expect("written");
        assert_eq!(load_batch(&path).expect("loads").len(), 2);
    }
}
