//! Nearest-neighbor field state.
//!
//! The field stores, for every interior pixel of the source image, the best
//! target coordinate found so far together with its patch-distance score.
//! Pixels inside the border margin of `radius` are never initialized,
//! updated, or read as patch centers; they exist only so the grids index
//! like the source image.

/// A single field entry: the matched target coordinate and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NnfEntry {
    /// Matched x coordinate in the target image.
    pub target_x: usize,
    /// Matched y coordinate in the target image.
    pub target_y: usize,
    /// Patch distance of the stored mapping. Never stale: it is recomputed
    /// whenever the offset changes.
    pub score: u64,
}

/// Per-pixel mapping from source coordinates to target coordinates.
pub struct NearestNeighborField {
    offsets: Vec<(usize, usize)>,
    scores: Vec<u64>,
    width: usize,
    height: usize,
    radius: usize,
}

impl NearestNeighborField {
    pub(crate) fn new(width: usize, height: usize, radius: usize) -> Self {
        Self {
            offsets: vec![(0, 0); width * height],
            scores: vec![u64::MAX; width * height],
            width,
            height,
            radius,
        }
    }

    /// Returns the field width (the source image width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the field height (the source image height).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the patch radius the field was built for.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Returns true if `(x, y)` lies in the margin-excluded interior.
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        let r = self.radius;
        x >= r && y >= r && x < self.width - r && y < self.height - r
    }

    pub(crate) fn is_interior_signed(&self, x: isize, y: isize) -> bool {
        let r = self.radius as isize;
        x >= r && y >= r && x < self.width as isize - r && y < self.height as isize - r
    }

    /// Returns the entry at `(x, y)`, or `None` in the margin or out of
    /// bounds.
    pub fn entry(&self, x: usize, y: usize) -> Option<NnfEntry> {
        if !self.is_interior(x, y) {
            return None;
        }
        let idx = y * self.width + x;
        let (target_x, target_y) = self.offsets[idx];
        Some(NnfEntry {
            target_x,
            target_y,
            score: self.scores[idx],
        })
    }

    /// Iterates over all interior coordinates in row-major scan order.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let r = self.radius;
        (r..self.height - r).flat_map(move |y| (r..self.width - r).map(move |x| (x, y)))
    }

    pub(crate) fn offset(&self, x: usize, y: usize) -> (usize, usize) {
        self.offsets[y * self.width + x]
    }

    pub(crate) fn score(&self, x: usize, y: usize) -> u64 {
        self.scores[y * self.width + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, target_x: usize, target_y: usize, score: u64) {
        let idx = y * self.width + x;
        self.offsets[idx] = (target_x, target_y);
        self.scores[idx] = score;
    }
}
