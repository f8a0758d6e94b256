//! Error types for edgematch.

use thiserror::Error;

/// Result alias for edgematch operations.
pub type EdgeMatchResult<T> = std::result::Result<T, EdgeMatchError>;

/// Errors that can occur when locating templates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EdgeMatchError {
    /// The image has zero width or height, or its size overflows.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The template does not fit inside the image being scanned.
    #[error("template {tpl_width}x{tpl_height} does not fit image {img_width}x{img_height}")]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The template carries no structure to correlate against.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// Loading or decoding an image failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}

impl EdgeMatchError {
    /// Returns true for errors describing an unusable target or template.
    pub fn is_invalid_image(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. }
                | Self::InvalidStride { .. }
                | Self::BufferTooSmall { .. }
                | Self::TemplateTooLarge { .. }
                | Self::DegenerateTemplate { .. }
        )
    }

    /// Returns true for malformed numeric parameters.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}
