//! Pipeline constants and runtime configuration defaults

/// Number of RGB entries in an extended color table
pub const TABLE_CAPACITY: usize = 256;

// Instruction sheets are only printable inside these bounds
/// Smallest accepted width or height in pixels
pub const MIN_DIMENSION: u32 = 32;
/// Largest accepted width or height in pixels
pub const MAX_DIMENSION: u32 = 500;
/// Quadrant side used when the width is a multiple of it
pub const LARGE_UNIT: u32 = 50;
/// Quadrant side used otherwise
pub const SMALL_UNIT: u32 = 32;

/// Colors used by fewer pixels than this are considered rare
pub const RARE_COLOR_LIMIT: u64 = 3;

// Overlay transform used to recolor the brick sprite
/// Channel values below this are pushed dark
pub const OVERLAY_DARK_THRESHOLD: u8 = 33;
/// Channel values above this are pushed bright
pub const OVERLAY_BRIGHT_THRESHOLD: u8 = 233;
/// Offset applied to near-black and near-white channel values
pub const OVERLAY_EXTREME_OFFSET: i32 = 100;
/// Offset subtracted from mid-range channel values
pub const OVERLAY_MIDTONE_OFFSET: i32 = 133;

/// Number of preset enhancement combinations
pub const PRESET_COUNT: usize = 10;

// Default values for configurable parameters
/// Largest side of the quantized image
pub const DEFAULT_TARGET_DIMENSION: u32 = 64;
/// Palette used when none is given
pub const DEFAULT_PALETTE: &str = "solid";
/// Strength of the preset effects
pub const DEFAULT_FACTOR: f32 = 0.5;
/// Preset effect applied when no custom adjustment is given
pub const DEFAULT_EFFECT: usize = 0;
/// Palettes rendered by the preview command
pub const DEFAULT_PREVIEW_PALETTES: [&str; 3] = ["art", "portrait", "solid"];

// Output naming
/// Ledger file name in the working directory
pub const DEFAULT_LEDGER_FILE: &str = "brick_quantity_log.csv";
/// Prefix of per-quadrant instruction sheets
pub const INSTRUCTIONS_PREFIX: &str = "Instructions_";
/// Prefix of the rendered mosaic
pub const MOSAIC_PREFIX: &str = "Result_preview_";
/// Prefix of the brick count report
pub const REPORT_PREFIX: &str = "Brick_count_";
/// Prefix of preview sheets
pub const PREVIEW_PREFIX: &str = "Previews_";
/// Suffix added to one-shot mosaic outputs
pub const MOSAIC_SUFFIX: &str = "_lego";
/// Extensions accepted as source images
pub const SOURCE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Instruction sheet layout
/// Side of one labeled cell in pixels
pub const LABEL_CELL_SIZE: u32 = 16;
/// Space reserved for axis numbers
pub const LABEL_MARGIN: u32 = 16;
/// Width of the heavier half-unit gridlines
pub const MAJOR_GRID_WIDTH: u32 = 3;

// Preview sheet layout
/// Preview sheet rows
pub const PREVIEW_ROWS: u32 = 5;
/// Preview sheet columns
pub const PREVIEW_COLUMNS: u32 = 2;
/// Magnification applied to each quantized preview
pub const PREVIEW_SCALE: u32 = 4;
/// Height of the title strip above each preview
pub const PREVIEW_TITLE_HEIGHT: u32 = 14;

// Brick sprite drawn when no sprite file is supplied
/// Side of the built-in brick sprite in pixels
pub const BRICK_SIZE: u32 = 30;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
