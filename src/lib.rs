//! NnField computes approximate nearest-neighbor fields between images.
//!
//! For every interior pixel of a source image the matcher finds a coordinate
//! in a target image whose surrounding square patch is similar, using the
//! randomized PatchMatch scheme: random initialization, directional
//! propagation of good matches, and exponentially-decaying random search.
//! The solver is single-threaded and approximate by construction.

pub mod field;
pub mod image;
pub mod matcher;
pub mod metric;
mod trace;
pub mod util;

pub use field::{NearestNeighborField, NnfEntry};
#[cfg(feature = "image-io")]
pub use image::io;
pub use image::{ImageView, OwnedImage};
pub use matcher::{MatchParams, PatchMatcher};
pub use metric::patch_distance;
pub use util::{NnfError, NnfResult};
