//! Multiscale template location.
//!
//! [`Locator`] runs the full pipeline: preprocess both images, search every
//! scale for windows above the threshold, then suppress overlapping
//! candidates. Single-scale helpers cover the native-resolution case.

pub(crate) mod config;
pub(crate) mod multiscale;
pub(crate) mod single;

pub use config::{LocateConfig, ScaleOrder, ScaleRange};

use crate::candidate::nms::suppress_with;
use crate::candidate::Detection;
use crate::edges::Preprocess;
use crate::image::{ImageView, OwnedImage};
use crate::ops::{DefaultOps, ImageOps};
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::EdgeMatchResult;

/// Locates every instance of a template in `target` with default operators.
///
/// Returns detections in descending score order; an empty vector when
/// nothing reaches `cfg.threshold`.
pub fn locate_instances(
    target: ImageView<'_>,
    template: ImageView<'_>,
    cfg: &LocateConfig,
) -> EdgeMatchResult<Vec<Detection>> {
    Locator::new()
        .with_config(cfg.clone())
        .locate(target, template)
}

/// Template locator parameterized over its image operators.
pub struct Locator<O = DefaultOps> {
    ops: O,
    cfg: LocateConfig,
}

impl Locator<DefaultOps> {
    /// Creates a locator with [`DefaultOps`] and the default configuration.
    pub fn new() -> Self {
        Self::with_ops(DefaultOps)
    }
}

impl Default for Locator<DefaultOps> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ImageOps> Locator<O> {
    /// Creates a locator around custom operators.
    pub fn with_ops(ops: O) -> Self {
        Self {
            ops,
            cfg: LocateConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: LocateConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &LocateConfig {
        &self.cfg
    }

    /// Full pipeline: preprocess, multiscale search, suppression.
    pub fn locate(
        &self,
        target: ImageView<'_>,
        template: ImageView<'_>,
    ) -> EdgeMatchResult<Vec<Detection>> {
        let _span = trace_span!(
            "locate",
            target_w = target.width(),
            target_h = target.height(),
            template_w = template.width(),
            template_h = template.height()
        )
        .entered();

        let candidates = self.search(target, template)?;
        let kept = suppress_with(
            &candidates,
            self.cfg.overlap_threshold,
            self.cfg.overlap_basis,
        );
        trace_event!("located", candidates = candidates.len(), kept = kept.len());
        Ok(kept)
    }

    /// Multiscale search without suppression.
    ///
    /// Candidates are grouped by scale in iteration order and row-major
    /// within a scale.
    pub fn search(
        &self,
        target: ImageView<'_>,
        template: ImageView<'_>,
    ) -> EdgeMatchResult<Vec<Detection>> {
        self.cfg.validate()?;
        let (target, plan) = self.prepare(target, template)?;
        multiscale::search_scales(&self.ops, target.view(), &plan, &self.cfg)
    }

    /// Every native-resolution window at or above the threshold, unsuppressed.
    pub fn match_all(
        &self,
        target: ImageView<'_>,
        template: ImageView<'_>,
    ) -> EdgeMatchResult<Vec<Detection>> {
        self.cfg.validate_single()?;
        let (target, plan) = self.prepare(target, template)?;
        single::match_all(&self.ops, target.view(), &plan, &self.cfg)
    }

    /// The single best native-resolution placement, regardless of threshold.
    ///
    /// Returns `None` when the template does not fit or every window is flat.
    pub fn best_match(
        &self,
        target: ImageView<'_>,
        template: ImageView<'_>,
    ) -> EdgeMatchResult<Option<Detection>> {
        self.cfg.validate_single()?;
        let (target, plan) = self.prepare(target, template)?;
        single::best_match(&self.ops, target.view(), &plan, &self.cfg)
    }

    /// Applies the configured preprocessing and plans the template.
    fn prepare(
        &self,
        target: ImageView<'_>,
        template: ImageView<'_>,
    ) -> EdgeMatchResult<(OwnedImage, TemplatePlan)> {
        let (target, template) = match self.cfg.preprocess {
            Preprocess::Edges(thresholds) => (
                self.ops.edges(target, thresholds)?,
                self.ops.edges(template, thresholds)?,
            ),
            Preprocess::Intensity => (
                OwnedImage::from_view(target)?,
                OwnedImage::from_view(template)?,
            ),
        };
        let plan = TemplatePlan::from_view(template.view())?;
        Ok((target, plan))
    }
}
