//! Shape extraction: binarization and contour tracing
//!
//! Binarizes the preprocessed grayscale image with a fixed global
//! threshold (the preprocessor already normalized contrast, so an
//! adaptive threshold is deliberately not used) and traces all closed
//! region boundaries as a flat list. Nesting is computed geometrically
//! downstream, never from the tracing hierarchy.
//!
//! Extraction sits behind the [`ShapeExtractor`] trait so the filtering
//! and nesting stages can be exercised with synthetic contour fixtures,
//! without real image decoding.

use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::point::Point;

/// An ordered, closed boundary of a connected region. Its only identity
/// is its index in the extraction output.
pub type ContourPoints = Vec<Point<u32>>;

/// Trait for shape extraction strategies.
///
/// Input: a preprocessed grayscale image. Output: an unordered flat
/// list of contours, one per traced boundary.
pub trait ShapeExtractor {
    /// Extract all region boundaries from the given grayscale image.
    fn extract(&self, image: &GrayImage) -> Vec<ContourPoints>;
}

/// Fixed-threshold extractor: global binarization followed by
/// Suzuki-Abe border following.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdExtractor {
    /// Binarization threshold; pixels strictly above become foreground.
    pub threshold: u8,
}

impl ThresholdExtractor {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Produce the black/white mask this extractor traces.
    pub fn binarize(&self, image: &GrayImage) -> GrayImage {
        threshold(image, self.threshold, ThresholdType::Binary)
    }
}

impl ShapeExtractor for ThresholdExtractor {
    fn extract(&self, image: &GrayImage) -> Vec<ContourPoints> {
        let mask = self.binarize(image);
        // Flat retrieval: border_type and parent links are discarded.
        find_contours::<u32>(&mask)
            .into_iter()
            .map(|c| c.points)
            .collect()
    }
}

// ============================================================
// Tests
// ============================================================
