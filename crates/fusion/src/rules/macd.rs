//! Activity / match / decision fusion.
//!
//! ```text
//! activity  A = |c|
//! match     M = Σ_5×5 a·b / (a² + b²)            (per channel, zero padded)
//! decision  D = 0.5                if A1 + A2 == 0 or M > 0.5·mean(M)
//!             = A1 / (A1 + A2)     otherwise
//! fused       = a if D == 0 and A1 > A2, b if D == 0 otherwise,
//!               D·a + (1 - D)·b    elsewhere
//! ```

use ndarray::{Array3, ArrayView3, Axis, Zip};
use tfuse_stats::filter::window_sums;

/// Side length of the match window.
const MATCH_WINDOW: usize = 5;
/// Fraction of the mean match above which the inputs are blended evenly.
const MATCH_FRACTION: f64 = 0.5;

/// Local match score, per channel.
fn match_map(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    let product = Zip::from(&a).and(&b).map_collect(|&x, &y| {
        let energy = x * x + y * y;
        if energy == 0.0 { 0.0 } else { x * y / energy }
    });
    let mut out = Array3::<f64>::zeros(product.raw_dim());
    for (src, mut dst) in product.axis_iter(Axis(2)).zip(out.axis_iter_mut(Axis(2))) {
        dst.assign(&window_sums(src, MATCH_WINDOW));
    }
    out
}

/// Activity / match / decision fusion of two bands.
///
/// Regions where the inputs are strongly correlated, or both silent, are
/// blended evenly; elsewhere the more active input dominates. A zero
/// decision (first input silent) selects whichever input is more active.
pub fn macd(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> Array3<f64> {
    let matches = match_map(a, b);
    let threshold = MATCH_FRACTION * tfuse_stats::mean(matches.iter());
    Zip::from(&a)
        .and(&b)
        .and(&matches)
        .map_collect(|&x, &y, &m| {
            let (a1, a2) = (x.abs(), y.abs());
            let total = a1 + a2;
            let decision = if total == 0.0 || m > threshold {
                0.5
            } else {
                a1 / total
            };
            if decision == 0.0 {
                if a1 > a2 { x } else { y }
            } else {
                decision * x + (1.0 - decision) * y
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_match_of_equal_inputs_is_half_window_count() {
        let a = Array3::from_elem((7, 7, 1), 3.0);
        let m = match_map(a.view(), a.view());
        // interior: 25 · (9 / 18)
        assert_relative_eq!(m[[3, 3, 0]], 12.5, epsilon = 1e-12);
        // corner sees a 3x3 block
        assert_relative_eq!(m[[0, 0, 0]], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_match_zero_energy_is_zero() {
        let z = Array3::<f64>::zeros((3, 3, 1));
        assert!(match_map(z.view(), z.view()).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_all_zero_bands() {
        let z = Array3::<f64>::zeros((4, 4, 2));
        let out = macd(z.view(), z.view());
        assert!(out.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_equal_bands_are_preserved() {
        let a = Array3::from_shape_fn((6, 6, 1), |(i, j, _)| (i as f64 - 2.5) * (j as f64 + 1.0));
        let out = macd(a.view(), a.view());
        for (x, y) in a.iter().zip(out.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_silent_first_input_selects_second() {
        // a is zero, b is active: D = 0 and A2 > A1, so b is taken
        let a = Array3::<f64>::zeros((5, 5, 1));
        let b = Array3::from_shape_fn((5, 5, 1), |(i, j, _)| 1.0 + (i * 5 + j) as f64);
        let out = macd(a.view(), b.view());
        assert_eq!(out, b);
    }

    #[test]
    fn test_anticorrelated_inputs_follow_activity() {
        // strongly anti-correlated: match is negative everywhere, below the threshold
        let a = Array3::from_shape_fn((5, 5, 1), |(i, j, _)| 1.0 + (i + j) as f64);
        let b = a.mapv(|v| -3.0 * v);
        let out = macd(a.view(), b.view());
        for ((x, y), f) in a.iter().zip(b.iter()).zip(out.iter()) {
            let d = x.abs() / (x.abs() + y.abs());
            assert_relative_eq!(*f, d * x + (1.0 - d) * y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_commutative_up_to_rounding() {
        let a = Array3::from_shape_fn((6, 5, 2), |(i, j, k)| ((i * 3 + j * 7 + k) as f64).sin() * 9.0);
        let b = Array3::from_shape_fn((6, 5, 2), |(i, j, k)| ((i * 5 + j + k * 2) as f64).cos() * 4.0);
        let ab = macd(a.view(), b.view());
        let ba = macd(b.view(), a.view());
        for (x, y) in ab.iter().zip(ba.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
