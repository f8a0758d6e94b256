//! Rayon-parallel kernels (feature-gated).
//!
//! Rows of the score surface are computed independently, so the parallel
//! result is bit-identical to [`ZnccScalar`](crate::kernel::scalar::ZnccScalar).

use crate::image::ImageView;
use crate::kernel::{placement_grid, zncc_with_stats, ScoreMap, WindowStats};
use crate::template::TemplatePlan;
use crate::util::EdgeMatchResult;
use rayon::prelude::*;

/// Row-parallel dense ZNCC surface.
pub fn zncc_score_map_par(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    min_var_i: f64,
) -> EdgeMatchResult<ScoreMap> {
    let (grid_w, grid_h) = placement_grid(image, plan)?;
    let stats = WindowStats::new(image);

    let mut scores = vec![f32::NEG_INFINITY; grid_w * grid_h];
    scores
        .par_chunks_mut(grid_w)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = zncc_with_stats(image, plan, &stats, x, y, min_var_i);
            }
        });

    Ok(ScoreMap::from_parts(grid_w, grid_h, scores))
}
