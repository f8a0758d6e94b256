//! Locator configuration and parameter validation.

use crate::candidate::OverlapBasis;
use crate::edges::Preprocess;
use crate::util::math::linspace;
use crate::util::{EdgeMatchError, EdgeMatchResult};

/// Linearly spaced scale factors applied to the target image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRange {
    /// Smallest scale factor (inclusive).
    pub min: f32,
    /// Largest scale factor (inclusive).
    pub max: f32,
    /// Number of samples between `min` and `max`.
    pub steps: usize,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self {
            min: 0.2,
            max: 1.5,
            steps: 40,
        }
    }
}

impl ScaleRange {
    /// Creates a scale range.
    pub fn new(min: f32, max: f32, steps: usize) -> Self {
        Self { min, max, steps }
    }

    /// Checks `0 < min < max`, finiteness and a non-zero step count.
    pub fn validate(&self) -> EdgeMatchResult<()> {
        if self.steps == 0 {
            return Err(EdgeMatchError::InvalidParameter {
                name: "scales.steps",
                reason: "must be at least 1",
            });
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(EdgeMatchError::InvalidParameter {
                name: "scales",
                reason: "bounds must be finite",
            });
        }
        if self.min <= 0.0 {
            return Err(EdgeMatchError::InvalidParameter {
                name: "scales.min",
                reason: "must be positive",
            });
        }
        if self.min >= self.max {
            return Err(EdgeMatchError::InvalidParameter {
                name: "scales",
                reason: "min must be smaller than max",
            });
        }
        Ok(())
    }

    /// Returns the scale samples in the requested order.
    pub fn values(&self, order: ScaleOrder) -> Vec<f32> {
        let mut values = linspace(self.min, self.max, self.steps);
        if order == ScaleOrder::Descending {
            values.reverse();
        }
        values
    }
}

/// Iteration order over the scale samples.
///
/// Order only affects the sequence of unsuppressed candidates returned by
/// [`Locator::search`](crate::Locator::search); suppression breaks score
/// ties by box, so located instances do not depend on it. Descending order
/// lets the search stop at the first scale where the target no longer fits
/// the template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleOrder {
    #[default]
    Ascending,
    Descending,
}

/// Configuration for [`Locator`](crate::Locator).
#[derive(Clone, Debug)]
pub struct LocateConfig {
    /// Minimum ZNCC score for a window to become a candidate, in `(0, 1)`.
    pub threshold: f32,
    /// Maximum overlap fraction tolerated between kept detections, in `(0, 1)`.
    pub overlap_threshold: f32,
    /// Denominator of the overlap fraction.
    pub overlap_basis: OverlapBasis,
    /// Scale factors applied to the target.
    pub scales: ScaleRange,
    /// Scale iteration order.
    pub scale_order: ScaleOrder,
    /// Transform applied to target and template before correlation.
    pub preprocess: Preprocess,
    /// Windows with variance sum at or below this value are skipped.
    pub min_var_i: f64,
    /// Run scales (or rows, for single-scale calls) on the rayon pool.
    pub parallel: bool,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            overlap_threshold: 0.3,
            overlap_basis: OverlapBasis::Picked,
            scales: ScaleRange::default(),
            scale_order: ScaleOrder::Ascending,
            preprocess: Preprocess::default(),
            min_var_i: 1e-8,
            parallel: false,
        }
    }
}

impl LocateConfig {
    /// Validates every numeric parameter; runs before any image work.
    pub fn validate(&self) -> EdgeMatchResult<()> {
        unit_interval(self.threshold, "threshold")?;
        unit_interval(self.overlap_threshold, "overlap_threshold")?;
        self.scales.validate()?;
        if let Preprocess::Edges(thresholds) = self.preprocess {
            thresholds.validate()?;
        }
        if !self.min_var_i.is_finite() || self.min_var_i < 0.0 {
            return Err(EdgeMatchError::InvalidParameter {
                name: "min_var_i",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Validates only the parameters used by single-scale matching.
    pub(crate) fn validate_single(&self) -> EdgeMatchResult<()> {
        unit_interval(self.threshold, "threshold")?;
        if let Preprocess::Edges(thresholds) = self.preprocess {
            thresholds.validate()?;
        }
        Ok(())
    }
}

fn unit_interval(value: f32, name: &'static str) -> EdgeMatchResult<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(EdgeMatchError::InvalidParameter {
            name,
            reason: "must lie strictly between 0 and 1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LocateConfig, ScaleOrder, ScaleRange};
    use crate::edges::{EdgeThresholds, Preprocess};
    use crate::util::EdgeMatchError;

    #[test]
    fn default_config_is_valid() {
        let cfg = LocateConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.threshold, 0.8);
        assert_eq!(cfg.overlap_threshold, 0.3);
        assert_eq!(cfg.scales, ScaleRange::new(0.2, 1.5, 40));
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        for threshold in [0.0, 1.0, -0.5, 1.5, f32::NAN] {
            let cfg = LocateConfig {
                threshold,
                ..LocateConfig::default()
            };
            assert_eq!(
                cfg.validate().unwrap_err(),
                EdgeMatchError::InvalidParameter {
                    name: "threshold",
                    reason: "must lie strictly between 0 and 1",
                }
            );
        }
    }

    #[test]
    fn malformed_scales_are_rejected() {
        let bad = [
            ScaleRange::new(0.2, 1.5, 0),
            ScaleRange::new(1.5, 0.2, 40),
            ScaleRange::new(1.0, 1.0, 1),
            ScaleRange::new(0.0, 1.0, 10),
            ScaleRange::new(0.2, f32::INFINITY, 10),
        ];
        for scales in bad {
            let cfg = LocateConfig {
                scales,
                ..LocateConfig::default()
            };
            assert!(cfg.validate().unwrap_err().is_invalid_parameter(), "{scales:?}");
        }
    }

    #[test]
    fn inverted_edge_thresholds_are_rejected() {
        let cfg = LocateConfig {
            preprocess: Preprocess::Edges(EdgeThresholds {
                low: 100.0,
                high: 10.0,
            }),
            ..LocateConfig::default()
        };
        assert!(cfg.validate().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn descending_order_reverses_samples() {
        let range = ScaleRange::new(0.5, 1.0, 3);
        assert_eq!(range.values(ScaleOrder::Ascending), vec![0.5, 0.75, 1.0]);
        assert_eq!(range.values(ScaleOrder::Descending), vec![1.0, 0.75, 0.5]);
    }
}
