//! Unit tests, one file per source module, mirroring `src/`

mod mosaic;
mod quantize;

// Tests the crate root re-exports the error type
#[test]
fn test_root_reexports() {
    let error = brickify::MosaicError::UnknownPalette {
        name: "neon".to_string(),
    };
    let result: brickify::Result<()> = Err(error);

    assert!(result.is_err_and(|e| e.to_string().contains("neon")));
}
