//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decode and encode
//! failures abort the whole operation; no partial buffer is ever returned.

use crate::image::OwnedImage;
use crate::util::{NnfError, NnfResult};
use std::path::Path;

/// Loads an image from disk and converts it to an owned 3-channel RGB buffer.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> NnfResult<OwnedImage> {
    let img = image::open(path).map_err(|err| NnfError::Decode {
        reason: err.to_string(),
    })?;
    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    OwnedImage::from_vec(rgb.into_raw(), width, height, 3)
}

/// Writes a 3-channel image to disk as PNG.
pub fn save_rgb_png<P: AsRef<Path>>(img: &OwnedImage, path: P) -> NnfResult<()> {
    if img.channels() != 3 {
        return Err(NnfError::Encode {
            reason: format!("expected 3 channels, got {}", img.channels()),
        });
    }
    image::save_buffer(
        path,
        img.as_slice(),
        img.width() as u32,
        img.height() as u32,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|err| NnfError::Encode {
        reason: err.to_string(),
    })
}
