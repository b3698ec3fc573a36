//! Solver constants and runtime configuration defaults

// Catalog construction
/// Largest quarter-turn count a base tile may request
pub const MAX_ROTATION: usize = 3;

/// Tile side length assumed until the catalog loader reads a real asset
pub const DEFAULT_TILE_PIXEL_SIZE: u32 = 10;

// Grid size
/// Default grid width in tiles
pub const DEFAULT_GRID_WIDTH: usize = 10;

/// Default grid height in tiles
pub const DEFAULT_GRID_HEIGHT: usize = 10;

// Keeps the composite image and per-cell bitsets within reasonable memory
/// Maximum allowed grid dimension in tiles
pub const MAX_GRID_DIMENSION: usize = 1_024;

// Restart policy
/// Default limit on solve attempts before reporting an unsolvable tileset
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Rendering
/// Fill colour for cells that hold no tile yet
pub const UNDECIDED_COLOR: [u8; 4] = [32, 32, 32, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// How many frame delays the final GIF frame is held for
pub const FINAL_FRAME_HOLD: u32 = 25;
