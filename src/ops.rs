//! Image-processing capabilities consumed by the locator.
//!
//! The search is written against [`ImageOps`] so it can run on synthetic
//! in-memory images with custom operators. [`DefaultOps`] wires the trait to
//! `imageproc` (Canny), `image` (resampling) and the crate's ZNCC kernel.

use crate::edges::{edge_map, EdgeThresholds};
use crate::image::io::{gray_image_from_view, owned_from_gray_image};
use crate::image::{ImageView, OwnedImage};
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{Kernel, ScoreMap};
use crate::template::TemplatePlan;
use crate::util::math::scaled_dim;
use crate::util::{EdgeMatchError, EdgeMatchResult};
use image::imageops::{self, FilterType};

/// Edge detection, resampling and correlation primitives.
pub trait ImageOps: Send + Sync {
    /// Binary edge map of `image` with the same dimensions.
    fn edges(
        &self,
        image: ImageView<'_>,
        thresholds: EdgeThresholds,
    ) -> EdgeMatchResult<OwnedImage>;

    /// Resamples `image` to exactly `width`x`height`.
    fn resize(
        &self,
        image: ImageView<'_>,
        width: usize,
        height: usize,
    ) -> EdgeMatchResult<OwnedImage>;

    /// Dense normalized correlation of `template` over `image`.
    fn correlate(
        &self,
        image: ImageView<'_>,
        template: &TemplatePlan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap>;

    /// Row-parallel variant of [`correlate`](Self::correlate).
    ///
    /// Defaults to the sequential implementation.
    #[cfg(feature = "rayon")]
    fn correlate_par(
        &self,
        image: ImageView<'_>,
        template: &TemplatePlan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap> {
        self.correlate(image, template, min_var_i)
    }

    /// Resizes by `scale`, rounding both dimensions to the nearest pixel.
    fn resize_by(&self, image: ImageView<'_>, scale: f32) -> EdgeMatchResult<OwnedImage> {
        let width = scaled_dim(image.width(), scale);
        let height = scaled_dim(image.height(), scale);
        self.resize(image, width, height)
    }
}

/// Default operators backed by `imageproc`, `image` and the scalar kernel.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultOps;

impl ImageOps for DefaultOps {
    fn edges(
        &self,
        image: ImageView<'_>,
        thresholds: EdgeThresholds,
    ) -> EdgeMatchResult<OwnedImage> {
        edge_map(image, thresholds)
    }

    fn resize(
        &self,
        image: ImageView<'_>,
        width: usize,
        height: usize,
    ) -> EdgeMatchResult<OwnedImage> {
        if width == 0 || height == 0 {
            return Err(EdgeMatchError::InvalidDimensions { width, height });
        }
        if width == image.width() && height == image.height() {
            return OwnedImage::from_view(image);
        }
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(EdgeMatchError::InvalidDimensions { width, height }),
        };
        let gray = gray_image_from_view(image)?;
        let resized = imageops::resize(&gray, w, h, FilterType::Triangle);
        owned_from_gray_image(&resized)
    }

    fn correlate(
        &self,
        image: ImageView<'_>,
        template: &TemplatePlan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap> {
        <ZnccScalar as Kernel>::score_map(image, template, min_var_i)
    }

    #[cfg(feature = "rayon")]
    fn correlate_par(
        &self,
        image: ImageView<'_>,
        template: &TemplatePlan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap> {
        crate::kernel::rayon::zncc_score_map_par(image, template, min_var_i)
    }
}
