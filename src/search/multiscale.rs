//! Multiscale correlation search over a resized target.
//!
//! Each scale resizes the preprocessed target, correlates it against the
//! template plan and maps every window at or above the threshold back to
//! original-image coordinates. Scales are independent; their outputs are
//! concatenated in iteration order.

use crate::candidate::Detection;
use crate::image::ImageView;
use crate::ops::ImageOps;
use crate::search::config::{LocateConfig, ScaleOrder};
use crate::template::TemplatePlan;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::{map_back, scaled_dim};
use crate::util::EdgeMatchResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Outcome of scanning one scale.
enum ScaleScan {
    /// The resized target is smaller than the template.
    TooSmall,
    /// Candidates found at this scale (possibly none).
    Found(Vec<Detection>),
}

/// Runs the scale loop and returns unsuppressed candidates.
pub(crate) fn search_scales<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
) -> EdgeMatchResult<Vec<Detection>> {
    let scales = cfg.scales.values(cfg.scale_order);
    let _span = trace_span!("multiscale_search", scales = scales.len()).entered();

    let scans = scan_all(ops, target, plan, cfg, &scales)?;

    let mut out = Vec::new();
    for (scale, scan) in scales.iter().zip(scans) {
        match scan {
            ScaleScan::TooSmall => {
                trace_debug!("scale_skipped", scale = *scale);
                if cfg.scale_order == ScaleOrder::Descending {
                    break;
                }
            }
            ScaleScan::Found(found) => {
                trace_debug!("scale_candidates", scale = *scale, count = found.len());
                out.extend(found);
            }
        }
    }

    trace_event!("search_candidates", count = out.len());
    Ok(out)
}

#[cfg(feature = "rayon")]
fn scan_all<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
    scales: &[f32],
) -> EdgeMatchResult<Vec<ScaleScan>> {
    if cfg.parallel {
        // `collect` keeps scale order, so suppression sees the same sequence
        // as the sequential path.
        return scales
            .par_iter()
            .map(|&scale| scan_scale(ops, target, plan, cfg, scale))
            .collect();
    }
    scan_sequential(ops, target, plan, cfg, scales)
}

#[cfg(not(feature = "rayon"))]
fn scan_all<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
    scales: &[f32],
) -> EdgeMatchResult<Vec<ScaleScan>> {
    scan_sequential(ops, target, plan, cfg, scales)
}

fn scan_sequential<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
    scales: &[f32],
) -> EdgeMatchResult<Vec<ScaleScan>> {
    let mut scans = Vec::with_capacity(scales.len());
    for &scale in scales {
        let scan = scan_scale(ops, target, plan, cfg, scale)?;
        let stop =
            matches!(scan, ScaleScan::TooSmall) && cfg.scale_order == ScaleOrder::Descending;
        scans.push(scan);
        if stop {
            break;
        }
    }
    Ok(scans)
}

fn scan_scale<O: ImageOps>(
    ops: &O,
    target: ImageView<'_>,
    plan: &TemplatePlan,
    cfg: &LocateConfig,
    scale: f32,
) -> EdgeMatchResult<ScaleScan> {
    let _span = trace_span!("search_scale", scale = scale).entered();
    let width = scaled_dim(target.width(), scale);
    let height = scaled_dim(target.height(), scale);
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    if width < tpl_width || height < tpl_height {
        return Ok(ScaleScan::TooSmall);
    }

    let resized = ops.resize(target, width, height)?;
    let map = ops.correlate(resized.view(), plan, cfg.min_var_i)?;

    let ratio = target.width() as f64 / resized.width() as f64;
    let found = map
        .above(cfg.threshold)
        .map(|(x, y, score)| {
            Detection::new(
                map_back(x, ratio),
                map_back(y, ratio),
                map_back(x + tpl_width, ratio),
                map_back(y + tpl_height, ratio),
                score,
            )
        })
        .collect();
    Ok(ScaleScan::Found(found))
}
