//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use brickify::MosaicError;
    use brickify::io::error::{ErrorContext, WithContext, file_system_error, invalid_parameter};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error(Path::new("/tmp/ledger.csv"), "read ledger", io_error);

        assert!(error.source().is_some());
        assert!(MosaicError::EmptyAdjustment.source().is_none());
    }

    // Tests InvalidGeometry formatting names the size and reason
    #[test]
    fn test_invalid_geometry_message() {
        let error = MosaicError::InvalidGeometry {
            width: 20,
            height: 40,
            reason: "smaller than 32px, resize the image".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("20x40"));
        assert!(message.contains("smaller than 32px"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("replace", &"H-L", &"expected OLD=NEW");

        let message = error.to_string();
        assert!(message.contains("replace"));
        assert!(message.contains("H-L"));
        assert!(message.contains("expected OLD=NEW"));
    }

    // Tests lookup failures name what was missing
    #[test]
    fn test_lookup_messages() {
        let palette = MosaicError::UnknownPalette {
            name: "neon".to_string(),
        };
        assert!(palette.to_string().contains("'neon'"));

        let code = MosaicError::UnknownColorCode {
            code: 'Z',
            context: "palette 'bw'".to_string(),
        };
        assert!(code.to_string().contains("'Z'"));
        assert!(code.to_string().contains("palette 'bw'"));

        let effect = MosaicError::UnknownEffectIndex { index: 12, max: 9 };
        assert!(effect.to_string().contains("12"));
        assert!(effect.to_string().contains("0 to 9"));
    }

    // Tests only missing assets and held ledgers stop a run
    // Verified by making every error abort
    #[test]
    fn test_aborts_run() {
        let missing = MosaicError::MissingAsset {
            kind: "Brick sprite",
            path: PathBuf::from("bricks/1x1.png"),
        };
        let locked = MosaicError::LedgerLocked {
            path: PathBuf::from("log.csv.lock"),
        };

        assert!(missing.aborts_run());
        assert!(locked.aborts_run());
        assert!(missing.to_string().contains("Brick sprite"));
        assert!(!MosaicError::EmptyAdjustment.aborts_run());
        assert!(
            !MosaicError::InvalidGeometry {
                width: 1,
                height: 1,
                reason: String::new()
            }
            .aborts_run()
        );
    }

    // Tests with_file fills the path of errors raised without one
    #[test]
    fn test_with_file_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let error = result.with_file(Path::new("raw/dog.png"));

        assert!(matches!(
            error,
            Err(MosaicError::FileSystem { ref path, .. }) if path == Path::new("raw/dog.png")
        ));
    }

    // Tests context never overrides a known path
    #[test]
    fn test_context_keeps_known_path() {
        let io_error = std::io::Error::other("boom");
        let result: Result<(), MosaicError> =
            Err(file_system_error(Path::new("known.csv"), "write ledger", io_error));
        let error = result.with_context(ErrorContext {
            file: Some(PathBuf::from("other.csv")),
            operation: None,
        });

        assert!(matches!(
            error,
            Err(MosaicError::FileSystem { ref path, operation: "write ledger", .. })
                if path == Path::new("known.csv")
        ));
    }
}
