//! Nesting level computation
//!
//! For each surviving rectangle, counts how many of the other survivors
//! it strictly encloses on all four sides. All-pairs O(n^2); inputs are
//! tens of rectangles per image, so no containment index is needed.
//! `compute_levels` is the seam to replace with an interval-tree query
//! if that ever changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rect::CandidateRect;

/// Final output record: one detected rectangle with its nesting level.
///
/// `bottom_right` is exclusive (`(x + width, y + height)`). Levels are
/// relative to the other detected rectangles in the same image only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedRect {
    /// Top-left corner (x, y).
    pub top_left: (u32, u32),
    /// Bottom-right corner (x, y), exclusive.
    pub bottom_right: (u32, u32),
    /// Number of other detected rectangles strictly enclosed.
    pub level: u32,
}

impl fmt::Display for NestedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rectangle: ({}, {}) - ({}, {}), Level: {}",
            self.top_left.0, self.top_left.1, self.bottom_right.0, self.bottom_right.1, self.level
        )
    }
}

/// Compute the nesting level of every rectangle against all the others.
///
/// Strict inequality on all four sides: touching or equal edges never
/// count, and a rectangle never contributes to its own level. Output
/// order matches input order.
pub fn compute_levels(rectangles: &[CandidateRect]) -> Vec<NestedRect> {
    rectangles
        .iter()
        .enumerate()
        .map(|(i, rect)| {
            let level = rectangles
                .iter()
                .enumerate()
                .filter(|&(j, other)| i != j && rect.strictly_encloses(other))
                .count() as u32;
            NestedRect {
                top_left: (rect.x, rect.y),
                bottom_right: (rect.right(), rect.bottom()),
                level,
            }
        })
        .collect()
}

// ============================================================
// Tests
// ============================================================
