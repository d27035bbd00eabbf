//! Statistical constants and runtime configuration defaults

// Target raster every corpus image is converted to
/// Default resize width in pixels
pub const DEFAULT_WIDTH: u32 = 512;
/// Default resize height in pixels
pub const DEFAULT_HEIGHT: u32 = 512;

/// Smallest representable greyscale intensity
pub const MIN_INTENSITY: f64 = 0.0;
/// Largest representable greyscale intensity
pub const MAX_INTENSITY: f64 = 255.0;

// Model selection
/// Shapiro-Wilk p-value threshold separating the Normal and Uniform branches
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Factor applied to the fitted standard deviation of Normal models
///
/// Values below 1 shrink the spread to counter over-dispersion of the raw fit
pub const DEFAULT_SPREAD_SHRINKAGE: f64 = 0.7;

/// Fewest observations the Shapiro-Wilk test accepts
pub const SHAPIRO_WILK_MIN_SAMPLES: usize = 3;
/// Sample size above which Shapiro-Wilk p-values lose accuracy
pub const SHAPIRO_WILK_RELIABLE_SAMPLES: usize = 5000;

// Default values for configurable parameters
/// Fixed seed for reproducible synthesis
pub const DEFAULT_SEED: u64 = 42;

/// Default number of draws reported in single-pixel mode
pub const DEFAULT_PIXEL_DRAWS: usize = 10;

// Output settings
/// Default file name for the synthesized image
pub const DEFAULT_OUTPUT_FILE: &str = "synthetic.png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
