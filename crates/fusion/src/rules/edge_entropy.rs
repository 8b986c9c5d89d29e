//! Entropy-weighted blending, on raw coefficients or on their edge maps.

use ndarray::{Array3, ArrayView3, Axis, Zip};
use tfuse_stats::filter::sobel_magnitude;
use tfuse_stats::shannon_entropy;

use super::elementwise::mean;

/// Shannon entropy of a band after shifting it so its minimum is zero.
fn shifted_entropy(band: ArrayView3<'_, f64>) -> f64 {
    let min = band.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted = band.mapv(|v| v - min);
    shannon_entropy(shifted.iter())
}

/// `(h1·a + h2·b) / (h1 + h2)`, or the mean when both weights are zero.
fn weighted_blend(
    a: ArrayView3<'_, f64>,
    b: ArrayView3<'_, f64>,
    h1: f64,
    h2: f64,
) -> Array3<f64> {
    let total = h1 + h2;
    if total == 0.0 {
        return mean(a, b);
    }
    Zip::from(&a)
        .and(&b)
        .map_collect(|&x, &y| (h1 * x + h2 * y) / total)
}

/// Blends two bands by their entropy share.
///
/// Each band's entropy is measured over all channels after shifting its
/// values to be non-negative. Falls back to [`mean`] when both are zero.
pub fn entropy(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    weighted_blend(a, b, shifted_entropy(a), shifted_entropy(b))
}

/// Sobel magnitude of every channel.
fn edge_map(band: ArrayView3<'_, f64>) -> Array3<f64> {
    let mut edges = Array3::<f64>::zeros(band.raw_dim());
    for (src, mut dst) in band.axis_iter(Axis(2)).zip(edges.axis_iter_mut(Axis(2))) {
        dst.assign(&sobel_magnitude(src));
    }
    edges
}

/// Blends two bands by the entropy share of their edge maps.
///
/// The edge map is the per-channel Sobel magnitude; the blend itself uses
/// the original coefficients. Falls back to [`mean`] when both entropies
/// are zero (flat bands).
pub fn edge(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    let h1 = shifted_entropy(edge_map(a).view());
    let h2 = shifted_entropy(edge_map(b).view());
    weighted_blend(a, b, h1, h2)
}
