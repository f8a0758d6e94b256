//! Owned contiguous grayscale buffers.

use crate::image::ImageView;
use crate::util::{EdgeMatchError, EdgeMatchResult};

/// Owned contiguous grayscale image buffer (`stride == width`).
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> EdgeMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(EdgeMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(EdgeMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(EdgeMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(EdgeMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> EdgeMatchResult<Self>
    where
        F: FnMut(usize, usize) -> u8,
    {
        let needed = width
            .checked_mul(height)
            .ok_or(EdgeMatchError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(needed);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_>) -> EdgeMatchResult<Self> {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Copies the `width`x`height` region at `(x, y)` into a new image.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> EdgeMatchResult<Self> {
        Self::from_view(self.view().roi(x, y, width, height)?)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
