//! Shannon entropy of an image.

use ndarray::ArrayView2;

/// Shannon entropy (bits) of the strictly positive samples of `x`.
///
/// Positive samples are normalised to sum to one; returns 0.0 when there
/// are none.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use tfuse_metrics::entropy;
///
/// let x = array![[1.0, 1.0], [1.0, 1.0]];
/// assert!((entropy(x.view()) - 2.0).abs() < 1e-12);
/// ```
pub fn entropy(x: ArrayView2<'_, f64>) -> f64 {
    tfuse_stats::shannon_entropy(x.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    #[test]
    fn test_zeros_have_zero_entropy() {
        let x = Array2::<f64>::zeros((4, 4));
        assert_eq!(entropy(x.view()), 0.0);
    }

    #[test]
    fn test_non_positive_samples_ignored() {
        let x = array![[-3.0, 0.0], [2.0, 2.0]];
        assert_relative_eq!(entropy(x.view()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_is_non_negative() {
        let x = Array2::from_shape_fn((8, 8), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
        assert!(entropy(x.view()) >= 0.0);
    }
}
