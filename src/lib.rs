//! rectnest - nested rectangle detection for raster images
//!
//! Detects rectangular shapes in a single still image and computes, for
//! each detected rectangle, how many other detected rectangles it
//! strictly encloses (its nesting level).
//!
//! # Pipeline
//!
//! raw image -> preprocessed grayscale -> contour set -> rectangle
//! candidates -> border-filtered candidates with levels -> annotated
//! image
//!
//! # Example
//!
//! ```rust,no_run
//! use rectnest::RectangleDetector;
//! use std::path::Path;
//!
//! let detector = RectangleDetector::new();
//! let records = detector.detect_path(Path::new("shapes.png")).unwrap();
//! for record in &records {
//!     println!("{}", record);
//! }
//! ```

// Submodules
pub mod annotate;
pub mod contour;
pub mod error;
pub mod nesting;
pub mod options;
pub mod preprocess;
pub mod rect;

mod pipeline;

// Re-export public API
pub use annotate::{annotate, annotate_mut};
pub use contour::{ContourPoints, ShapeExtractor, ThresholdExtractor};
pub use error::{DetectError, Result};
pub use nesting::{compute_levels, NestedRect};
pub use options::{DetectOptions, DetectOptionsBuilder};
pub use pipeline::RectangleDetector;
pub use preprocess::preprocess;
pub use rect::{candidate_from_contour, CandidateRect};

/// Process exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 3;
}
