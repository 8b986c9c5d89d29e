//! Per-coefficient rules: mean and soft minimum / maximum.

use ndarray::{Array3, ArrayView3, Zip};
use tfuse_stats::is_close;

/// Relative tolerance below which an operand counts as zero for [`min`].
const MIN_ZERO_TOL: f64 = 1e-3;
/// Relative tolerance below which an operand counts as zero for [`max`].
const MAX_ZERO_TOL: f64 = 1e-2;

/// Element-wise average.
pub fn mean(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    Zip::from(&a).and(&b).map_collect(|&x, &y| (x + y) / 2.0)
}

/// Soft element-wise minimum.
///
/// With `Δ = |a| + |b|` and `lo`, `hi` the smaller and larger magnitude:
///
/// | Case | Result |
/// |------|--------|
/// | `Δ == 0` | `0` |
/// | `a` or `b` is zero | `min(a, b)` |
/// | same sign | `(|b|·a + |a|·b) / Δ` |
/// | `a < 0 < b` | `(hi·a + lo·b) / Δ` |
/// | `a > 0 > b` | `(lo·a + hi·b) / Δ` |
pub fn min(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    Zip::from(&a).and(&b).map_collect(|&x, &y| soft_min(x, y))
}

/// Soft element-wise maximum; the mirror of [`min`].
///
/// | Case | Result |
/// |------|--------|
/// | `Δ == 0` | `0` |
/// | `a` or `b` is zero | `max(a, b)` |
/// | same sign | `(|a|·a + |b|·b) / Δ` |
/// | `a < 0 < b` | `(lo·a + hi·b) / Δ` |
/// | `a > 0 > b` | `(hi·a + lo·b) / Δ` |
pub fn max(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    Zip::from(&a).and(&b).map_collect(|&x, &y| soft_max(x, y))
}

fn soft_min(a: f64, b: f64) -> f64 {
    let delta = a.abs() + b.abs();
    if delta == 0.0 {
        return 0.0;
    }
    if is_close(a, 0.0, MIN_ZERO_TOL) || is_close(b, 0.0, MIN_ZERO_TOL) {
        return a.min(b);
    }
    let (lo, hi) = magnitudes(a, b);
    if a.signum() == b.signum() {
        (b.abs() / delta) * a + (a.abs() / delta) * b
    } else if a < 0.0 {
        (hi / delta) * a + (lo / delta) * b
    } else {
        (lo / delta) * a + (hi / delta) * b
    }
}

fn soft_max(a: f64, b: f64) -> f64 {
    let delta = a.abs() + b.abs();
    if delta == 0.0 {
        return 0.0;
    }
    if is_close(a, 0.0, MAX_ZERO_TOL) || is_close(b, 0.0, MAX_ZERO_TOL) {
        return a.max(b);
    }
    let (lo, hi) = magnitudes(a, b);
    if a.signum() == b.signum() {
        (a.abs() / delta) * a + (b.abs() / delta) * b
    } else if a < 0.0 {
        (lo / delta) * a + (hi / delta) * b
    } else {
        (hi / delta) * a + (lo / delta) * b
    }
}

fn magnitudes(a: f64, b: f64) -> (f64, f64) {
    let (x, y) = (a.abs(), b.abs());
    (x.min(y), x.max(y))
}
