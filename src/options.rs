//! Detection options
//!
//! Every numeric knob of the pipeline lives here as a named constant so
//! the processing contract is visible in one place. The defaults are the
//! contract; the builder exists for tests and tuning.

// ============================================================
// Constants
// ============================================================

/// Gaussian blur kernel size in pixels (must be odd)
pub const BLUR_KERNEL_SIZE: u32 = 7;

/// CLAHE clip limit (histogram bins above `clip * tile_area / 256`
/// are clipped and the excess redistributed)
pub const CLAHE_CLIP_LIMIT: f32 = 10.0;

/// CLAHE tile grid size (8x8 tiles)
pub const CLAHE_TILE_GRID: u32 = 8;

/// Global binarization threshold (pixels strictly above become white)
pub const BINARY_THRESHOLD: u8 = 127;

/// Polygon approximation epsilon as fraction of contour perimeter (1%)
pub const POLY_APPROX_EPSILON: f64 = 0.01;

// ============================================================
// Options
// ============================================================

/// Options for the rectangle detection pipeline
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Gaussian blur kernel size in pixels (odd)
    pub blur_kernel_size: u32,
    /// CLAHE clip limit
    pub clahe_clip_limit: f32,
    /// CLAHE tile grid size (N x N tiles)
    pub clahe_tile_grid: u32,
    /// Binarization threshold
    pub binary_threshold: u8,
    /// Polygon approximation epsilon as fraction of perimeter
    pub approx_epsilon: f64,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            blur_kernel_size: BLUR_KERNEL_SIZE,
            clahe_clip_limit: CLAHE_CLIP_LIMIT,
            clahe_tile_grid: CLAHE_TILE_GRID,
            binary_threshold: BINARY_THRESHOLD,
            approx_epsilon: POLY_APPROX_EPSILON,
        }
    }
}

impl DetectOptions {
    /// Create a new builder
    pub fn builder() -> DetectOptionsBuilder {
        DetectOptionsBuilder::default()
    }

    /// Blur sigma auto-derived from the kernel size, matching the
    /// `0.3 * ((k - 1) / 2 - 1) + 0.8` convention for "sigma = 0" blur
    /// requests. For the default 7x7 kernel this is 1.4.
    pub fn blur_sigma(&self) -> f32 {
        0.3 * ((self.blur_kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }
}

/// Builder for DetectOptions
#[derive(Debug, Default)]
pub struct DetectOptionsBuilder {
    options: DetectOptions,
}

impl DetectOptionsBuilder {
    /// Set the blur kernel size (clamped to odd)
    #[must_use]
    pub fn blur_kernel_size(mut self, size: u32) -> Self {
        self.options.blur_kernel_size = if size % 2 == 0 { size + 1 } else { size };
        self
    }

    /// Set the CLAHE clip limit
    #[must_use]
    pub fn clahe_clip_limit(mut self, clip: f32) -> Self {
        self.options.clahe_clip_limit = clip.max(1.0);
        self
    }

    /// Set the CLAHE tile grid size
    #[must_use]
    pub fn clahe_tile_grid(mut self, tiles: u32) -> Self {
        self.options.clahe_tile_grid = tiles.max(1);
        self
    }

    /// Set the binarization threshold
    #[must_use]
    pub fn binary_threshold(mut self, threshold: u8) -> Self {
        self.options.binary_threshold = threshold;
        self
    }

    /// Set the polygon approximation epsilon fraction
    #[must_use]
    pub fn approx_epsilon(mut self, epsilon: f64) -> Self {
        self.options.approx_epsilon = epsilon.clamp(0.0, 1.0);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> DetectOptions {
        self.options
    }
}

// ============================================================
// Tests
// ============================================================
