//! Error types for container encode/decode and save dispatch.

use texstack::ImageError;
use thiserror::Error;

/// Result type for codec operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised by the container codecs and the save/load dispatch.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No codec recognized the input, the save path has no known
    /// extension, or a raster-only input arrived without a raster codec.
    #[error("unsupported file format")]
    UnsupportedFileFormat,

    /// A container header failed a structural check or the pixel blob
    /// is truncated.
    #[error("corrupt file: {0}")]
    CorruptFile(&'static str),

    /// The requested operation is reserved but not implemented.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// A raster target (PNG/JPG/BMP) cannot represent this image.
    #[error("image not representable in a raster format: {0}")]
    UnsupportedForRaster(&'static str),

    /// The host raster codec reported a failure.
    #[error("raster codec error: {0}")]
    RasterCodec(&'static str),

    /// An image-level operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Stream or file I/O failed.
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
