//! Edge-map preprocessing for shape-based matching.
//!
//! Matching on binary edge maps instead of raw intensity makes the score
//! depend on contours only, so color and smooth lighting gradients drop out.

use crate::image::io::{gray_image_from_view, owned_from_gray_image};
use crate::image::{ImageView, OwnedImage};
use crate::util::{EdgeMatchError, EdgeMatchResult};

/// Value written to edge pixels in a binary edge map.
pub const EDGE: u8 = 255;

/// Canny hysteresis thresholds on gradient magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeThresholds {
    /// Weak-edge threshold; pixels below it are never edges.
    pub low: f32,
    /// Strong-edge threshold; pixels above it always seed an edge.
    pub high: f32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 200.0,
        }
    }
}

impl EdgeThresholds {
    /// Checks that both thresholds are finite, non-negative and ordered.
    pub fn validate(&self) -> EdgeMatchResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(EdgeMatchError::InvalidParameter {
                name: "edge_thresholds",
                reason: "must be finite",
            });
        }
        if self.low < 0.0 {
            return Err(EdgeMatchError::InvalidParameter {
                name: "edge_thresholds.low",
                reason: "must be non-negative",
            });
        }
        if self.low > self.high {
            return Err(EdgeMatchError::InvalidParameter {
                name: "edge_thresholds",
                reason: "low must not exceed high",
            });
        }
        Ok(())
    }
}

/// How target and template are transformed before correlation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Preprocess {
    /// Correlate Canny edge maps.
    Edges(EdgeThresholds),
    /// Correlate raw grayscale intensity.
    Intensity,
}

impl Default for Preprocess {
    fn default() -> Self {
        Self::Edges(EdgeThresholds::default())
    }
}

/// Computes a binary Canny edge map (`0` or [`EDGE`]) of the same size.
pub fn edge_map(image: ImageView<'_>, thresholds: EdgeThresholds) -> EdgeMatchResult<OwnedImage> {
    thresholds.validate()?;
    let gray = gray_image_from_view(image)?;
    let edges = imageproc::edges::canny(&gray, thresholds.low, thresholds.high);
    owned_from_gray_image(&edges)
}
