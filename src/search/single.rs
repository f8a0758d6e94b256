//! Single-scale matching at the target's native resolution.

use crate::candidate::Detection;
use crate::image::ImageView;
use crate::kernel::ScoreMap;
use crate::ops::ImageOps;
use crate::search::config::LocateConfig;
use crate::template::TemplatePlan;
use crate::util::EdgeMatchResult;

/// Correlates at scale 1.0, switching to the row-parallel kernel on request.
pub(crate) fn score_native<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
) -> EdgeMatchResult<ScoreMap> {
    #[cfg(feature = "rayon")]
    {
        if cfg.parallel {
            return ops.correlate_par(target, plan, cfg.min_var_i);
        }
    }
    ops.correlate(target, plan, cfg.min_var_i)
}

/// Every window with `score >= threshold`, in row-major order, unsuppressed.
pub(crate) fn match_all<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
) -> EdgeMatchResult<Vec<Detection>> {
    if !target.fits(plan.width(), plan.height()) {
        return Ok(Vec::new());
    }
    let map = score_native(ops, target, plan, cfg)?;
    Ok(map
        .above(cfg.threshold)
        .map(|(x, y, score)| to_detection(plan, x, y, score))
        .collect())
}

/// The global maximum of the native-resolution score surface.
pub(crate) fn best_match<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
) -> EdgeMatchResult<Option<Detection>> {
    if !target.fits(plan.width(), plan.height()) {
        return Ok(None);
    }
    let map = score_native(ops, target, plan, cfg)?;
    Ok(map
        .max_location()
        .map(|(x, y, score)| to_detection(plan, x, y, score)))
}

fn to_detection(plan: &TemplatePlan, x: usize, y: usize, score: f32) -> Detection {
    Detection::new(x, y, x + plan.width(), y + plan.height(), score)
}
