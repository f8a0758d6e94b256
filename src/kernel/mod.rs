//! Correlation kernels producing dense score surfaces.
//!
//! A kernel slides a [`TemplatePlan`] over every valid placement of an image
//! and writes one score per top-left offset into a [`ScoreMap`]. Placements
//! whose image window is flat (variance at or below `min_var_i`) have no
//! defined score and are stored as `f32::NEG_INFINITY`.

use crate::image::ImageView;
use crate::template::TemplatePlan;
use crate::util::{EdgeMatchError, EdgeMatchResult};

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Dense scoring kernel over every template placement.
pub trait Kernel {
    type Plan;

    /// Scores every valid placement and returns the dense surface.
    fn score_map(
        image: ImageView<'_>,
        plan: &Self::Plan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap>;
}

/// Dense correlation surface, one score per valid template placement.
#[derive(Clone, Debug)]
pub struct ScoreMap {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreMap {
    pub(crate) fn from_parts(width: usize, height: usize, scores: Vec<f32>) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    /// Number of placements along x (`img_width - tpl_width + 1`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of placements along y (`img_height - tpl_height + 1`).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns the row-major score buffer.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Iterates placements with `score >= threshold` in row-major order.
    pub fn above(&self, threshold: f32) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width;
        self.scores
            .iter()
            .enumerate()
            .filter(move |&(_, score)| *score >= threshold)
            .map(move |(idx, &score)| (idx % width, idx / width, score))
    }

    /// Returns the highest defined score and its placement.
    ///
    /// The first placement in row-major order wins ties.
    pub fn max_location(&self) -> Option<(usize, usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, score)| (idx % self.width, idx / self.width, score))
    }
}

/// Summed-area tables over an image for O(1) window sums.
pub(crate) struct WindowStats {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl WindowStats {
    pub(crate) fn new(image: ImageView<'_>) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];
        for (y, row) in image.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sq;
            }
        }
        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    /// Sum of squared deviations from the mean for the window at `(x, y)`.
    ///
    /// Computed exactly in integers, so flat windows yield exactly zero.
    pub(crate) fn variance_sum(&self, x: usize, y: usize, width: usize, height: usize) -> f64 {
        let s = self.rect(&self.sum, x, y, width, height);
        let sq = self.rect(&self.sum_sq, x, y, width, height);
        let n = (width * height) as u128;
        let num = n * u128::from(sq) - u128::from(s) * u128::from(s);
        num as f64 / n as f64
    }

    fn rect(&self, table: &[u64], x: usize, y: usize, width: usize, height: usize) -> u64 {
        let s = self.stride;
        let a = table[y * s + x];
        let b = table[y * s + x + width];
        let c = table[(y + height) * s + x];
        let d = table[(y + height) * s + x + width];
        d + a - b - c
    }
}

/// Validates that `plan` fits in `image`; returns the placement grid size.
pub(crate) fn placement_grid(
    image: ImageView<'_>,
    plan: &TemplatePlan,
) -> EdgeMatchResult<(usize, usize)> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    if !image.fits(tpl_width, tpl_height) {
        return Err(EdgeMatchError::TemplateTooLarge {
            tpl_width,
            tpl_height,
            img_width,
            img_height,
        });
    }
    Ok((img_width - tpl_width + 1, img_height - tpl_height + 1))
}

/// Scores one placement given precomputed window statistics.
pub(crate) fn zncc_with_stats(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    stats: &WindowStats,
    x: usize,
    y: usize,
    min_var_i: f64,
) -> f32 {
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    let var_i = stats.variance_sum(x, y, tpl_width, tpl_height);
    if var_i <= min_var_i {
        return f32::NEG_INFINITY;
    }

    let t_prime = plan.t_prime();
    let mut dot = 0.0f64;
    for ty in 0..tpl_height {
        let Some(img_row) = image.row(y + ty) else {
            return f32::NEG_INFINITY;
        };
        let window = &img_row[x..x + tpl_width];
        let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];
        for (&t, &value) in tpl_row.iter().zip(window) {
            dot += t * f64::from(value);
        }
    }

    let score = dot / (plan.var_t() * var_i).sqrt();
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        f32::NEG_INFINITY
    }
}
