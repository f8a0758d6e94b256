//! Detection records and overlap pruning.
//!
//! A [`Detection`] is an axis-aligned box in original-image pixels plus its
//! correlation score. Box extents are inclusive pixel counts, so a box from
//! `x1` to `x2` spans `x2 - x1 + 1` columns.

pub(crate) mod nms;

pub use nms::OverlapBasis;

/// Candidate match `(x1, y1, x2, y2, score)` in original-image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Left edge.
    pub x1: usize,
    /// Top edge.
    pub y1: usize,
    /// Right edge.
    pub x2: usize,
    /// Bottom edge.
    pub y2: usize,
    /// ZNCC score in `[-1, 1]`.
    pub score: f32,
}

impl Detection {
    /// Creates a detection from corner coordinates and a score.
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize, score: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            score,
        }
    }

    /// Inclusive pixel area `(x2 - x1 + 1) * (y2 - y1 + 1)`.
    pub fn area(&self) -> f64 {
        let w = self.x2.saturating_sub(self.x1) as f64 + 1.0;
        let h = self.y2.saturating_sub(self.y1) as f64 + 1.0;
        w * h
    }

    /// Inclusive pixel area shared with `other` (zero when disjoint).
    pub fn intersection(&self, other: &Detection) -> f64 {
        let xx1 = self.x1.max(other.x1) as f64;
        let yy1 = self.y1.max(other.y1) as f64;
        let xx2 = self.x2.min(other.x2) as f64;
        let yy2 = self.y2.min(other.y2) as f64;
        let w = (xx2 - xx1 + 1.0).max(0.0);
        let h = (yy2 - yy1 + 1.0).max(0.0);
        w * h
    }

    /// Returns the corners as a tuple `(x1, y1, x2, y2)`.
    pub fn corners(&self) -> (usize, usize, usize, usize) {
        (self.x1, self.y1, self.x2, self.y2)
    }
}
