//! Rectangle filtering: polygon validation, bounding boxes, and
//! image-border exclusion
//!
//! A contour becomes a candidate rectangle only if its reduced polygon
//! has exactly 4 vertices and is convex. The candidate's bounding box
//! is taken over the original contour points (not the 4 reduced
//! vertices), so rotated rectangles are reported by their axis-aligned
//! extent.

use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;

use crate::contour::ContourPoints;

/// A rectangle candidate derived from one contour.
///
/// Pixel-inclusive bounding box semantics: `width = max_x - min_x + 1`,
/// so a contour touching the right-most pixel column has
/// `x + width == image_width`. Width and height are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of the source contour in extraction order.
    pub contour_index: usize,
}

impl CandidateRect {
    /// One past the right-most pixel column.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom-most pixel row.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True if the bounding box lies on any image border. Exact
    /// equality on pixel coordinates; a box one pixel off the border
    /// does not touch.
    pub fn touches_border(&self, image_width: u32, image_height: u32) -> bool {
        self.x == 0
            || self.y == 0
            || self.right() == image_width
            || self.bottom() == image_height
    }

    /// True if `self` strictly encloses `other` on all four sides.
    /// Touching or equal edges never count.
    pub fn strictly_encloses(&self, other: &CandidateRect) -> bool {
        self.x < other.x
            && self.right() > other.right()
            && self.y < other.y
            && self.bottom() > other.bottom()
    }
}

/// Try to turn a contour into a rectangle candidate.
///
/// The contour is reduced with Ramer-Douglas-Peucker at
/// `epsilon_fraction` of its closed perimeter; only convex
/// quadrilaterals pass. Returns `None` for anything else — a non-match,
/// not an error.
pub fn candidate_from_contour(
    contour: &ContourPoints,
    contour_index: usize,
    epsilon_fraction: f64,
) -> Option<CandidateRect> {
    if contour.len() < 4 {
        return None;
    }

    let perimeter = arc_length(contour, true);
    let epsilon = epsilon_fraction * perimeter;
    if epsilon <= 0.0 {
        return None;
    }

    let approx = approximate_polygon_dp(contour, epsilon, true);
    if approx.len() != 4 || !is_convex_polygon(&approx) {
        return None;
    }

    Some(bounding_box(contour, contour_index))
}

/// Axis-aligned, pixel-inclusive bounding box of a contour.
fn bounding_box(contour: &ContourPoints, contour_index: usize) -> CandidateRect {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    for p in contour {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    CandidateRect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
        contour_index,
    }
}

/// Convexity test over an ordered vertex cycle: the z-components of all
/// consecutive edge cross products must share a sign. Collinear
/// vertices (zero cross) are tolerated; mixed signs reject.
fn is_convex_polygon(vertices: &[Point<u32>]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut positive = false;
    let mut negative = false;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let abx = b.x as i64 - a.x as i64;
        let aby = b.y as i64 - a.y as i64;
        let bcx = c.x as i64 - b.x as i64;
        let bcy = c.y as i64 - b.y as i64;
        let cross = abx * bcy - aby * bcx;
        if cross > 0 {
            positive = true;
        } else if cross < 0 {
            negative = true;
        }
        if positive && negative {
            return false;
        }
    }
    true
}

// ============================================================
// Tests
// ============================================================
