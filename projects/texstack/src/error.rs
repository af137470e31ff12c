//! Error types for descriptor validation, conversion and image storage.

use crate::allocate::AllocateError;
use thiserror::Error;

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors raised by per-pixel format conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The sign/width combination has no conversion path.
    #[error("unsupported sign/width combination for conversion")]
    UnsupportedConversion,

    /// A block-compressed (or multi-pixel-block) format reached a per-pixel converter.
    #[error("per-pixel conversion does not support block formats")]
    CompressedFormat,
}

/// Errors raised by image-level operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// A pixel format failed validation.
    #[error("invalid pixel format: {0:#010x}")]
    InvalidFormat(u32),

    /// A plane or image descriptor failed its invariants.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(&'static str),

    /// A caller-supplied buffer is smaller than the descriptor requires.
    #[error("buffer too small: required {required} bytes, got {actual} bytes")]
    BufferTooSmall { required: usize, actual: usize },

    /// Pixel format conversion failed.
    #[error("conversion failed: {0}")]
    Convert(#[from] ConvertError),

    /// Aligned pixel buffer allocation failed.
    #[error("allocation failed: {0}")]
    Allocate(#[from] AllocateError),
}
