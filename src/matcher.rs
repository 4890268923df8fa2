//! The PatchMatch solver.
//!
//! `PatchMatcher` owns the nearest-neighbor field for a source/target image
//! pair and refines it in place. Construction seeds the field with random
//! guesses; every later change flows through the single strict-improvement
//! acceptance primitive, so scores can only improve or hold across
//! iterations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::field::NearestNeighborField;
use crate::image::{ImageView, OwnedImage};
use crate::metric::patch_distance;
use crate::trace::{trace_event, trace_span};
use crate::util::{NnfError, NnfResult};

/// Matcher configuration.
///
/// The seed is explicit: two matchers built with the same images and the
/// same seed produce byte-identical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchParams {
    /// Patch half-width; the comparison window is `(2 * radius + 1)²`.
    pub radius: usize,
    /// Full propagation/search passes performed by [`PatchMatcher::run`].
    pub iterations: usize,
    /// Seed for the matcher's private random source.
    pub seed: u64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            radius: 3,
            iterations: 3,
            seed: 0,
        }
    }
}

/// Randomized iterative nearest-neighbor field solver.
pub struct PatchMatcher<'a> {
    source: ImageView<'a>,
    target: ImageView<'a>,
    field: NearestNeighborField,
    rng: StdRng,
    radius: usize,
    iterations: usize,
}

impl<'a> PatchMatcher<'a> {
    /// Validates the configuration and initializes the field with random
    /// guesses. After this the matcher is ready; [`Self::iterate`] may be
    /// called any number of times.
    pub fn new(
        source: ImageView<'a>,
        target: ImageView<'a>,
        params: &MatchParams,
    ) -> NnfResult<Self> {
        if params.radius == 0 {
            return Err(NnfError::InvalidConfig("patch radius must be at least 1"));
        }
        if source.channels() != target.channels() {
            return Err(NnfError::InvalidConfig(
                "source and target must have the same channel count",
            ));
        }
        // Each axis needs at least one margin-excluded interior pixel.
        let span = 2 * params.radius;
        if source.width() <= span || source.height() <= span {
            return Err(NnfError::InvalidConfig(
                "source image too small for an interior pixel at this radius",
            ));
        }
        if target.width() <= span || target.height() <= span {
            return Err(NnfError::InvalidConfig(
                "target image too small for an interior pixel at this radius",
            ));
        }

        let mut matcher = Self {
            source,
            target,
            field: NearestNeighborField::new(source.width(), source.height(), params.radius),
            rng: StdRng::seed_from_u64(params.seed),
            radius: params.radius,
            iterations: params.iterations,
        };
        matcher.init();
        Ok(matcher)
    }

    /// Seeds every interior pixel with an independent uniform guess into
    /// the target interior and its true score.
    fn init(&mut self) {
        let _span = trace_span!(
            "nnf_init",
            width = self.field.width(),
            height = self.field.height()
        )
        .entered();

        let r = self.radius;
        let (tw, th) = (self.target.width(), self.target.height());
        let mut seeded = 0usize;
        for y in r..self.field.height() - r {
            for x in r..self.field.width() - r {
                let tx = self.rng.random_range(r..tw - r);
                let ty = self.rng.random_range(r..th - r);
                let score = patch_distance(self.source, x, y, self.target, tx, ty, r);
                self.field.set(x, y, tx, ty, score);
                seeded += 1;
            }
        }
        trace_event!("nnf_init_done", pixels = seeded);
    }

    /// Proposes `(cx, cy)` as a match for `(x, y)`. Candidates outside the
    /// target's margin-excluded interior are silently ignored; in-bounds
    /// candidates replace the stored entry only on strict improvement.
    fn update(&mut self, x: usize, y: usize, cx: isize, cy: isize) {
        let r = self.radius as isize;
        if cx < r
            || cy < r
            || cx >= self.target.width() as isize - r
            || cy >= self.target.height() as isize - r
        {
            return;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        let d = patch_distance(self.source, x, y, self.target, cx, cy, self.radius);
        if d < self.field.score(x, y) {
            self.field.set(x, y, cx, cy, d);
        }
    }

    /// Proposes the offsets of the two neighbors already visited in the
    /// current sweep, each shifted back by `d` along its own axis.
    /// Neighbors in the uninitialized margin are skipped.
    fn propagate(&mut self, x: usize, y: usize, d: isize) {
        let nx = x as isize + d;
        if self.field.is_interior_signed(nx, y as isize) {
            let (tx, ty) = self.field.offset(nx as usize, y);
            self.update(x, y, tx as isize - d, ty as isize);
        }

        let ny = y as isize + d;
        if self.field.is_interior_signed(x as isize, ny) {
            let (tx, ty) = self.field.offset(x, ny as usize);
            self.update(x, y, tx as isize, ty as isize - d);
        }
    }

    /// Random walk around the current best match with exponentially
    /// decaying radius: `max(target.W, target.H), /2, /4, …, 1`. The walk
    /// center is the best offset at entry and does not move mid-walk.
    fn search(&mut self, x: usize, y: usize) {
        let (bx, by) = self.field.offset(x, y);
        // i64 draws: rand implements SampleUniform for fixed-width
        // integers, not isize.
        let mut r = self.target.width().max(self.target.height()) as i64;
        while r >= 1 {
            let cx = bx as isize + self.rng.random_range(-r..=r) as isize;
            let cy = by as isize + self.rng.random_range(-r..=r) as isize;
            self.update(x, y, cx, cy);
            r >>= 1;
        }
    }

    /// Runs one full pass: a forward sweep propagating from the left/top
    /// neighbors, then a backward sweep propagating from the right/bottom
    /// neighbors, each followed by random search at every pixel.
    pub fn iterate(&mut self) {
        let _span = trace_span!("nnf_iterate").entered();

        let r = self.radius;
        let (w, h) = (self.field.width(), self.field.height());
        for y in r..h - r {
            for x in r..w - r {
                self.propagate(x, y, -1);
                self.search(x, y);
            }
        }
        for y in (r..h - r).rev() {
            for x in (r..w - r).rev() {
                self.propagate(x, y, 1);
                self.search(x, y);
            }
        }
    }

    /// Runs the configured number of iterations.
    pub fn run(&mut self) {
        for _ in 0..self.iterations {
            self.iterate();
        }
    }

    /// Returns the current field.
    pub fn field(&self) -> &NearestNeighborField {
        &self.field
    }

    /// Builds an image of the source's dimensions where every interior
    /// pixel is the target pixel at the stored offset. Margin pixels stay
    /// zero; they are never computed.
    pub fn reconstruct(&self) -> OwnedImage {
        let channels = self.target.channels();
        let (w, h) = (self.field.width(), self.field.height());
        let mut data = vec![0u8; w * h * channels];
        for (x, y) in self.field.interior() {
            let (tx, ty) = self.field.offset(x, y);
            let px = self.target.pixel(tx, ty).expect("offset within target");
            let at = (y * w + x) * channels;
            data[at..at + channels].copy_from_slice(px);
        }
        OwnedImage::from_raw(data, w, h, channels)
    }
}
