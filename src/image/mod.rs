//! 8-bit grayscale images.
//!
//! Targets, templates, edge maps and resized scales all travel through the
//! pipeline as [`ImageView`]s: borrowed, row-strided windows onto a byte
//! buffer. Padded rows are allowed (`stride >= width`), and sub-regions share
//! the parent buffer instead of copying it.

use crate::util::{EdgeMatchError, EdgeMatchResult};

pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Borrowed grayscale image with an explicit row stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Wraps a tightly packed buffer (`stride == width`).
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> EdgeMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Wraps a buffer whose rows start every `stride` bytes.
    ///
    /// The last row only needs `width` bytes, so a trimmed final row is
    /// accepted.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> EdgeMatchResult<Self> {
        let needed = span_len(width, height, stride)?;
        if data.len() < needed {
            return Err(EdgeMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The backing buffer, padding included.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Intensity at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.row(y)?.get(x).copied()
    }

    /// The `width` pixels of row `y`, without padding.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        self.data.get(start..start.checked_add(self.width)?)
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// True when a `width`x`height` template has at least one placement.
    pub fn fits(&self, width: usize, height: usize) -> bool {
        width <= self.width && height <= self.height
    }

    /// Zero-copy sub-region with top-left corner `(x, y)`.
    ///
    /// Fails with `InvalidDimensions` (carrying the requested size) when the
    /// region is empty or reaches past the right or bottom border.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> EdgeMatchResult<Self> {
        let rejected = EdgeMatchError::InvalidDimensions { width, height };
        let inside = width > 0
            && height > 0
            && x.checked_add(width).is_some_and(|end| end <= self.width)
            && y.checked_add(height).is_some_and(|end| end <= self.height);
        if !inside {
            return Err(rejected);
        }
        // `y < self.height` and `x < self.width`, so the offset is in bounds.
        let offset = y * self.stride + x;
        let data = self.data.get(offset..).ok_or(rejected)?;
        Self::new(data, width, height, self.stride)
    }
}

/// Minimum buffer length for a `width`x`height` image with the given stride.
fn span_len(width: usize, height: usize, stride: usize) -> EdgeMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(EdgeMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(EdgeMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|rows| rows.checked_add(width))
        .ok_or(EdgeMatchError::InvalidDimensions { width, height })
}
