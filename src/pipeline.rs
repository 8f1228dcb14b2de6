//! Detection pipeline orchestration
//!
//! Wires the stages together: preprocess -> extract contours -> filter
//! rectangles -> exclude border boxes -> compute nesting levels. Data
//! flows strictly left to right; each stage owns its output and hands
//! it to the next by value. Single-threaded and synchronous.

use std::path::Path;

use image::RgbImage;
use tracing::debug;

use crate::contour::{ContourPoints, ShapeExtractor, ThresholdExtractor};
use crate::error::{DetectError, Result};
use crate::nesting::{compute_levels, NestedRect};
use crate::options::DetectOptions;
use crate::preprocess::preprocess;
use crate::rect::{candidate_from_contour, CandidateRect};

/// Nested rectangle detector.
///
/// A pure function of one input image per run; running it twice on the
/// same image produces identical results.
#[derive(Debug, Clone, Default)]
pub struct RectangleDetector {
    options: DetectOptions,
}

impl RectangleDetector {
    /// Create a detector with the default contract options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom options.
    pub fn with_options(options: DetectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Load an image from disk and detect nested rectangles in it.
    ///
    /// A missing or undecodable file is fatal for the run.
    pub fn detect_path(&self, path: &Path) -> Result<Vec<NestedRect>> {
        if !path.exists() {
            return Err(DetectError::ImageNotFound(path.to_path_buf()));
        }
        let image = image::open(path)?.to_rgb8();
        self.detect(&image)
    }

    /// Detect nested rectangles in a color image.
    ///
    /// Returns one record per surviving rectangle, in extraction order.
    /// An image with no detectable rectangles yields an empty list,
    /// which is success, not an error.
    pub fn detect(&self, image: &RgbImage) -> Result<Vec<NestedRect>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectError::EmptyImage { width, height });
        }

        let enhanced = preprocess(image, &self.options);
        let extractor = ThresholdExtractor::new(self.options.binary_threshold);
        let contours = extractor.extract(&enhanced);
        debug!(contours = contours.len(), "contours traced");

        Ok(self.analyze_contours(&contours, width, height))
    }

    /// Run the filtering, exclusion, and nesting stages over already
    /// extracted contours. This is the geometric core; it has no image
    /// dependency and is total over well-formed contours.
    pub fn analyze_contours(
        &self,
        contours: &[ContourPoints],
        width: u32,
        height: u32,
    ) -> Vec<NestedRect> {
        let candidates: Vec<CandidateRect> = contours
            .iter()
            .enumerate()
            .filter_map(|(i, c)| candidate_from_contour(c, i, self.options.approx_epsilon))
            .filter(|rect| !rect.touches_border(width, height))
            .collect();
        debug!(
            contours = contours.len(),
            rectangles = candidates.len(),
            "rectangle candidates after border exclusion"
        );

        compute_levels(&candidates)
    }
}

// ============================================================
// Tests
// ============================================================
