//! Tests for pipeline configuration

#[cfg(test)]
mod tests {
    use brickify::io::configuration::{
        DEFAULT_EFFECT, DEFAULT_FACTOR, DEFAULT_PALETTE, DEFAULT_TARGET_DIMENSION,
    };
    use brickify::pipeline::config::parse_replacements;
    use brickify::pipeline::{PipelineConfig, ReplaceMode};

    // Tests defaults match the configured constants
    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.target_dimension, DEFAULT_TARGET_DIMENSION);
        assert_eq!(config.palette, DEFAULT_PALETTE);
        assert_eq!(config.effect, DEFAULT_EFFECT);
        assert_eq!(config.factor, DEFAULT_FACTOR);
        assert!(config.adjustments.is_empty());
        assert!(!config.dither);
        assert_eq!(config.replace, ReplaceMode::Off);
    }

    // Tests both separators, case folding and surrounding whitespace
    // Verified by removing the uppercase conversion
    #[test]
    fn test_parse_replacements() {
        let pairs = parse_replacements(" h=l , A:b ,").expect("valid");

        assert_eq!(pairs, vec![('H', 'L'), ('A', 'B')]);
        assert_eq!(parse_replacements("").expect("valid"), Vec::new());
    }

    // Tests malformed pairs are rejected
    #[test]
    fn test_parse_replacements_malformed() {
        for spec in ["H", "HL=A", "H=", "=L", "H-L"] {
            assert!(parse_replacements(spec).is_err(), "{spec} should be rejected");
        }
    }
}
