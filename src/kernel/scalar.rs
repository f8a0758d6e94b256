//! Scalar reference kernel for ZNCC score surfaces.

use crate::image::ImageView;
use crate::kernel::{placement_grid, zncc_with_stats, Kernel, ScoreMap, WindowStats};
use crate::template::TemplatePlan;
use crate::util::EdgeMatchResult;

/// Scalar zero-mean normalized cross-correlation kernel.
///
/// Equivalent to `TM_CCOEFF_NORMED`: scores lie in `[-1, 1]` and are
/// invariant to affine brightness changes of either input.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    type Plan = TemplatePlan;

    fn score_map(
        image: ImageView<'_>,
        plan: &Self::Plan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap> {
        let (grid_w, grid_h) = placement_grid(image, plan)?;
        let stats = WindowStats::new(image);

        let mut scores = Vec::with_capacity(grid_w * grid_h);
        for y in 0..grid_h {
            for x in 0..grid_w {
                scores.push(zncc_with_stats(image, plan, &stats, x, y, min_var_i));
            }
        }
        Ok(ScoreMap::from_parts(grid_w, grid_h, scores))
    }
}
