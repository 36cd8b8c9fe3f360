//! Error types and context management for mosaic operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A required source image or tile sprite could not be located
    MissingAsset {
        /// What the file was needed for
        kind: &'static str,
        /// Path that was looked up
        path: PathBuf,
    },

    /// Image dimensions fall outside the range instructions can be printed for
    InvalidGeometry {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
        /// Which bound was violated
        reason: String,
    },

    /// Custom enhancement requested with every delta set to zero
    EmptyAdjustment,

    /// Preset effect index outside the supported range
    UnknownEffectIndex {
        /// Requested effect index
        index: usize,
        /// Largest supported index
        max: usize,
    },

    /// Palette name not present in the registry
    UnknownPalette {
        /// Requested palette name
        name: String,
    },

    /// Color code not present where it was looked up
    UnknownColorCode {
        /// The offending code
        code: char,
        /// Palette or table the lookup was made against
        context: String,
    },

    /// Palette holds more colors than an extended table can carry
    PaletteTooLarge {
        /// Palette name
        name: String,
        /// Number of colors in the palette
        len: usize,
        /// Maximum table capacity
        capacity: usize,
    },

    /// Tabular input (ledger or batch file) could not be parsed
    MalformedTable {
        /// File the table was read from
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Another writer currently holds the ledger
    LedgerLocked {
        /// Path of the lock file
        path: PathBuf,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl MosaicError {
    /// Whether the error stops the whole run instead of just the current image
    pub const fn aborts_run(&self) -> bool {
        matches!(self, Self::MissingAsset { .. } | Self::LedgerLocked { .. })
    }
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MissingAsset { kind, path } => {
                write!(f, "{kind} '{}' was not found", path.display())
            }
            Self::InvalidGeometry {
                width,
                height,
                reason,
            } => {
                write!(f, "Image of {width}x{height} px rejected: {reason}")
            }
            Self::EmptyAdjustment => {
                write!(
                    f,
                    "At least one of color, brightness, contrast or sharpness must be non-zero"
                )
            }
            Self::UnknownEffectIndex { index, max } => {
                write!(f, "Effect {index} is not supported (expected 0 to {max})")
            }
            Self::UnknownPalette { name } => {
                write!(f, "Palette '{name}' is not defined")
            }
            Self::UnknownColorCode { code, context } => {
                write!(f, "Color code '{code}' is not defined in {context}")
            }
            Self::PaletteTooLarge {
                name,
                len,
                capacity,
            } => {
                write!(
                    f,
                    "Palette '{name}' has {len} colors but tables hold at most {capacity}"
                )
            }
            Self::MalformedTable { path, line, reason } => {
                write!(f, "Malformed table '{}' line {line}: {reason}", path.display())
            }
            Self::LedgerLocked { path } => {
                write!(
                    f,
                    "Ledger is locked by another writer (remove '{}' if stale)",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File being processed when the error occurred
    pub file: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches errors raised without a path with the file being processed
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the file context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the file context applied
    fn with_file(self, file: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MosaicError::ImageLoad { path, .. } | MosaicError::ImageExport { path, .. } => {
                    if let Some(file) = &context.file {
                        if path.as_os_str() == UNKNOWN_PATH {
                            path.clone_from(file);
                        }
                    }
                }
                MosaicError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(file) = &context.file {
                        if path.as_os_str() == UNKNOWN_PATH {
                            path.clone_from(file);
                        }
                    }
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_file(self, file: &Path) -> Result<T> {
        self.with_context(ErrorContext {
            file: Some(file.to_path_buf()),
            ..Default::default()
        })
    }
}

const UNKNOWN_PATH: &str = "<unknown>";

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: &Path,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}
