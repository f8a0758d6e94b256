//! Template plan precomputation for zero-mean normalized correlation.

use crate::image::ImageView;
use crate::util::{EdgeMatchError, EdgeMatchResult};

/// Precomputed statistics and zero-mean buffer for ZNCC scoring.
///
/// `t_prime[i] = t[i] - mean(t)` and `var_t = sum(t_prime^2)`, so the score
/// at a window `I` is `sum(t_prime * I) / sqrt(var_t * var_i)`.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_t: f64,
    t_prime: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// Fails with `DegenerateTemplate` when every sample has the same value,
    /// e.g. an edge map without a single edge pixel.
    pub fn from_view(tpl: ImageView<'_>) -> EdgeMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(EdgeMatchError::InvalidDimensions { width, height })?;

        let sum: u64 = tpl.rows().flatten().map(|&v| u64::from(v)).sum();
        let mean = sum as f64 / count as f64;

        let t_prime: Vec<f64> = tpl.rows().flatten().map(|&v| f64::from(v) - mean).collect();
        let var_t: f64 = t_prime.iter().map(|d| d * d).sum();
        if var_t <= 1e-8 {
            return Err(EdgeMatchError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        Ok(Self {
            width,
            height,
            mean,
            var_t,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f64] {
        &self.t_prime
    }
}
