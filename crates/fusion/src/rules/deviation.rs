//! Tile-wise standard-deviation weighting.

use ndarray::{Array3, ArrayView3, Zip, s};
use tfuse_stats::population_std;

/// Default tile side length.
pub const DEFAULT_TILE: usize = 8;

/// [`deviation_with_tile`] with 8×8 tiles.
pub fn deviation(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    deviation_with_tile(a, b, DEFAULT_TILE)
}

/// Blends non-overlapping `tile × tile` blocks by their standard deviation.
///
/// Within every tile and channel, `s1` and `s2` are the population
/// standard deviations of the two inputs and the tile becomes
/// `(s1·a + s2·b) / (s1 + s2)`; tiles where both are flat take the mean.
/// Tiles on the right and bottom edges may be smaller.
///
/// # Panics
///
/// Panics if `tile` is zero.
pub fn deviation_with_tile(
    a: ArrayView3<'_, f64>,
    b: ArrayView3<'_, f64>,
    tile: usize,
) -> Array3<f64> {
    assert!(tile > 0, "tile size must be positive");
    let (h, w, channels) = a.dim();
    let mut out = Array3::<f64>::zeros(a.raw_dim());

    for r0 in (0..h).step_by(tile) {
        let r1 = (r0 + tile).min(h);
        for c0 in (0..w).step_by(tile) {
            let c1 = (c0 + tile).min(w);
            for k in 0..channels {
                let ta = a.slice(s![r0..r1, c0..c1, k]);
                let tb = b.slice(s![r0..r1, c0..c1, k]);
                let s1 = population_std(ta.iter());
                let s2 = population_std(tb.iter());
                let total = s1 + s2;
                let blended = if total == 0.0 {
                    Zip::from(&ta).and(&tb).map_collect(|&x, &y| (x + y) / 2.0)
                } else {
                    Zip::from(&ta)
                        .and(&tb)
                        .map_collect(|&x, &y| (s1 * x + s2 * y) / total)
                };
                out.slice_mut(s![r0..r1, c0..c1, k]).assign(&blended);
            }
        }
    }
    out
}
