//! Greedy non-maximum suppression over detection boxes.

use crate::candidate::Detection;
use crate::trace::{trace_event, trace_span};

/// Denominator used when measuring how much two boxes overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapBasis {
    /// Intersection over the area of the box being kept.
    #[default]
    Picked,
    /// Intersection over the area of the box being tested for removal.
    Candidate,
    /// Symmetric intersection over union.
    Union,
}

impl OverlapBasis {
    /// Overlap fraction of `other` against the already picked box.
    pub fn overlap(self, picked: &Detection, other: &Detection) -> f64 {
        let inter = picked.intersection(other);
        let denom = match self {
            Self::Picked => picked.area(),
            Self::Candidate => other.area(),
            Self::Union => picked.area() + other.area() - inter,
        };
        inter / denom
    }
}

/// Greedy suppression with the asymmetric picked-area overlap.
///
/// Shorthand for [`suppress_with`] using [`OverlapBasis::Picked`].
pub fn suppress(detections: &[Detection], overlap_threshold: f32) -> Vec<Detection> {
    suppress_with(detections, overlap_threshold, OverlapBasis::Picked)
}

/// Reduces overlapping detections to one per object instance.
///
/// Detections are sorted by ascending score; the last remaining one is kept
/// and every remaining detection whose overlap with it exceeds
/// `overlap_threshold` is dropped. Equal scores are ordered by corners, so
/// the box with the larger `(x1, y1, x2, y2)` is picked first regardless of
/// input order; this keeps suppression idempotent. The result is in
/// selection order, i.e. descending score.
pub fn suppress_with(
    detections: &[Detection],
    overlap_threshold: f32,
    basis: OverlapBasis,
) -> Vec<Detection> {
    if detections.is_empty() {
        return Vec::new();
    }
    let _span = trace_span!("suppress", input = detections.len()).entered();

    let threshold = f64::from(overlap_threshold);
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| {
        let (da, db) = (&detections[a], &detections[b]);
        da.score
            .total_cmp(&db.score)
            .then_with(|| da.corners().cmp(&db.corners()))
    });

    let mut kept = Vec::new();
    while let Some(pick) = order.pop() {
        let picked = detections[pick];
        kept.push(picked);
        order.retain(|&idx| basis.overlap(&picked, &detections[idx]) <= threshold);
    }

    trace_event!("suppressed", kept = kept.len(), dropped = detections.len() - kept.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::{suppress, suppress_with, OverlapBasis};
    use crate::candidate::Detection;

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(suppress(&[], 0.3).is_empty());
    }

    #[test]
    fn keeps_higher_score_of_heavily_overlapping_pair() {
        let a = Detection::new(0, 0, 9, 9, 0.9);
        let b = Detection::new(5, 0, 14, 9, 0.85);
        let kept = suppress(&[b, a], 0.3);
        assert_eq!(kept, vec![a]);
    }

    #[test]
    fn keeps_disjoint_boxes_in_descending_score_order() {
        let a = Detection::new(0, 0, 9, 9, 0.82);
        let b = Detection::new(50, 50, 59, 59, 0.95);
        let c = Detection::new(100, 0, 109, 9, 0.88);
        let kept = suppress(&[a, b, c], 0.3);
        assert_eq!(kept, vec![b, c, a]);
    }

    #[test]
    fn ties_are_broken_by_corners_not_input_order() {
        let low = Detection::new(0, 0, 9, 9, 0.9);
        let high = Detection::new(1, 1, 10, 10, 0.9);
        assert_eq!(suppress(&[low, high], 0.3), vec![high]);
        assert_eq!(suppress(&[high, low], 0.3), vec![high]);
    }

    #[test]
    fn tied_nested_boxes_are_stable_under_resuppression() {
        let small = Detection::new(10, 10, 19, 19, 1.0);
        let big = Detection::new(0, 0, 39, 39, 1.0);
        let once = suppress(&[small, big], 0.3);
        assert_eq!(once, vec![small]);
        assert_eq!(suppress(&once, 0.3), once);
        assert_eq!(suppress(&[big, small], 0.3), once);
    }

    #[test]
    fn overlap_is_normalized_by_picked_area() {
        // Small box fully inside a large one: 100% of the small box overlaps,
        // but only 100 / 1600 of the large one.
        let big = Detection::new(0, 0, 39, 39, 0.95);
        let small = Detection::new(10, 10, 19, 19, 0.9);
        assert_eq!(suppress(&[big, small], 0.3), vec![big, small]);

        // With the large box scored lower, the small one is picked and the
        // large one is measured against the small area.
        let big_low = Detection { score: 0.8, ..big };
        assert_eq!(suppress(&[big_low, small], 0.3), vec![small]);
    }

    #[test]
    fn alternative_bases_change_the_outcome() {
        let big = Detection::new(0, 0, 39, 39, 0.95);
        let small = Detection::new(10, 10, 19, 19, 0.9);
        assert_eq!(
            suppress_with(&[big, small], 0.3, OverlapBasis::Candidate),
            vec![big]
        );
        assert_eq!(
            suppress_with(&[big, small], 0.3, OverlapBasis::Union),
            vec![big, small]
        );
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let a = Detection::new(0, 0, 9, 9, 0.9);
        let b = Detection::new(7, 0, 16, 9, 0.8);
        // Intersection is 3 columns x 10 rows = 30, i.e. exactly 0.3.
        assert_eq!(suppress(&[a, b], 0.3), vec![a, b]);
        assert_eq!(suppress(&[a, b], 0.29), vec![a]);
    }
}
