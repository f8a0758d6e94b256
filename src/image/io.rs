//! Bridges between edgematch buffers and the `image` crate.

use crate::image::{ImageView, OwnedImage};
use crate::util::{EdgeMatchError, EdgeMatchResult};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &GrayImage) -> EdgeMatchResult<ImageView<'_>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &GrayImage) -> EdgeMatchResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Creates an owned grayscale image from a color or grayscale dynamic image.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> EdgeMatchResult<OwnedImage> {
    owned_from_gray_image(&img.to_luma8())
}

/// Copies a view into a `GrayImage` for use with `image`/`imageproc`.
pub fn gray_image_from_view(view: ImageView<'_>) -> EdgeMatchResult<GrayImage> {
    let owned = OwnedImage::from_view(view)?;
    gray_image_from_owned(owned)
}

pub(crate) fn gray_image_from_owned(img: OwnedImage) -> EdgeMatchResult<GrayImage> {
    let width = img.width();
    let height = img.height();
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(EdgeMatchError::InvalidDimensions { width, height }),
    };
    GrayImage::from_raw(w, h, img.into_vec())
        .ok_or(EdgeMatchError::InvalidDimensions { width, height })
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> EdgeMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| EdgeMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Decodes an in-memory encoded image (PNG/JPEG) to grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> EdgeMatchResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| EdgeMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
