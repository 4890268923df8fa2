//! Error types for nnfield.

use thiserror::Error;

/// Result alias for nnfield operations.
pub type NnfResult<T> = std::result::Result<T, NnfError>;

/// Errors that can occur when building images or configuring the matcher.
///
/// The matching loop itself has no error states: margin exclusion and the
/// candidate bounds check keep every patch access in-bounds by construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NnfError {
    /// An image dimension or channel count is zero.
    #[error("invalid image dimensions {width}x{height} with {channels} channels")]
    InvalidDimensions {
        width: usize,
        height: usize,
        channels: usize,
    },
    /// The pixel buffer does not match the declared dimensions.
    #[error("buffer length mismatch: needed {needed} bytes, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// The matcher parameters are unusable for the given images.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// An input image could not be decoded.
    #[error("image decode failed: {reason}")]
    Decode { reason: String },
    /// The output image could not be written.
    #[error("image encode failed: {reason}")]
    Encode { reason: String },
}
