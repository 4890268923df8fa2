//! Image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a flat byte buffer holding
//! interleaved fixed-channel pixels in row-major scanline order, with an
//! explicit stride. The stride counts bytes between the starts of
//! consecutive rows, so a stride larger than `width * channels` represents
//! padded rows. `OwnedImage` is the contiguous owning counterpart.

use crate::util::{NnfError, NnfResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D multi-channel image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> NnfResult<Self> {
        Self::new(data, width, height, channels, width * channels)
    }

    /// Creates a view with an explicit row stride in bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> NnfResult<Self> {
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(NnfError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the channel values of the pixel at `(x, y)` if in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.channels)?)?;
        self.data.get(start..start + self.channels)
    }

    /// Returns a contiguous slice for row `y` with `width * channels` bytes.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }
}

/// Owned contiguous multi-channel image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl OwnedImage {
    /// Wraps a decoded pixel buffer. The buffer length must be exactly
    /// `width * height * channels`.
    pub fn from_vec(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> NnfResult<Self> {
        let needed = required_len(width, height, channels, width * channels)?;
        if data.len() != needed {
            return Err(NnfError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    // Caller guarantees `data.len() == width * height * channels` and
    // nonzero dimensions.
    pub(crate) fn from_raw(data: Vec<u8>, width: usize, height: usize, channels: usize) -> Self {
        debug_assert_eq!(data.len(), width * height * channels);
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the raw interleaved pixel bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns the raw pixel bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Returns a borrowed view of the whole image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> NnfResult<usize> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(NnfError::InvalidDimensions {
            width,
            height,
            channels,
        });
    }
    let row = width
        .checked_mul(channels)
        .ok_or(NnfError::InvalidDimensions {
            width,
            height,
            channels,
        })?;
    if stride < row {
        return Err(NnfError::InvalidDimensions {
            width,
            height,
            channels,
        });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row))
        .ok_or(NnfError::InvalidDimensions {
            width,
            height,
            channels,
        })
}
