//! Patch dissimilarity scoring.

use crate::ImageView;

/// Computes the dissimilarity between the patch of `a` centered at
/// `(xa, ya)` and the patch of `b` centered at `(xb, yb)`: the sum over the
/// `(2 * radius + 1)²` window of squared channel differences.
///
/// Channel bytes are widened to `i32` before subtraction so the difference
/// cannot wrap. The caller must keep both windows fully in-bounds; the hot
/// loop performs no bounds checks beyond row lookup. Both images must have
/// the same channel count.
pub fn patch_distance(
    a: ImageView<'_>,
    xa: usize,
    ya: usize,
    b: ImageView<'_>,
    xb: usize,
    yb: usize,
    radius: usize,
) -> u64 {
    debug_assert_eq!(a.channels(), b.channels());
    let channels = a.channels();
    let span = (2 * radius + 1) * channels;
    let base_a = (xa - radius) * channels;
    let base_b = (xb - radius) * channels;

    let mut sum = 0u64;
    for dy in 0..=2 * radius {
        let row_a = a.row(ya - radius + dy).expect("window within image a");
        let row_b = b.row(yb - radius + dy).expect("window within image b");
        let pa = &row_a[base_a..base_a + span];
        let pb = &row_b[base_b..base_b + span];
        for (va, vb) in pa.iter().zip(pb) {
            let d = i32::from(*va) - i32::from(*vb);
            sum += (d * d) as u64;
        }
    }
    sum
}
