//! Universal image quality index.

use ndarray::{ArrayView2, Zip};
use tfuse_stats::{mean, population_variance};
use tracing::debug;

use crate::error::MetricsError;

/// Configuration for [`iqi`].
///
/// # Example
///
/// ```
/// use tfuse_metrics::IqiConfig;
///
/// let config = IqiConfig::default().with_window(16);
/// assert_eq!(config.window(), 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IqiConfig {
    window: usize,
}

impl Default for IqiConfig {
    fn default() -> Self {
        Self { window: 8 }
    }
}

impl IqiConfig {
    /// Set the side length of the square sliding window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Returns the window side length.
    pub fn window(&self) -> usize {
        self.window
    }
}

/// Quality index of one window, or `None` if it is undefined.
fn window_quality(x: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>) -> Option<f64> {
    let mx = mean(x.iter());
    let my = mean(y.iter());
    let vx = population_variance(x.iter());
    let vy = population_variance(y.iter());
    let cov = Zip::from(&x)
        .and(&y)
        .fold(0.0, |acc, &a, &b| acc + (a - mx) * (b - my))
        / x.len() as f64;

    let var_sum = vx + vy;
    let denominator = var_sum * (mx * mx + my * my);
    if denominator != 0.0 {
        Some(4.0 * cov * mx * my / denominator)
    } else if var_sum != 0.0 {
        Some(2.0 * cov / var_sum)
    } else {
        None
    }
}

/// Image quality index of `x` against reference `y`.
///
/// Every valid position of a square sliding window contributes
/// `Q = 4·σxy·μx·μy / ((σx² + σy²)(μx² + μy²))`, which combines
/// correlation, luminance similarity and contrast similarity. Where the
/// denominator vanishes but `σx² + σy²` does not, `2·σxy / (σx² + σy²)`
/// is used; windows where both vanish are skipped. The result is the mean
/// over the remaining windows and lies in `[-1, 1]`.
///
/// A window larger than the image is clamped to the image size.
///
/// # Errors
///
/// - [`MetricsError::ShapeMismatch`] if the shapes differ.
/// - [`MetricsError::EmptyImage`] if the images are empty.
/// - [`MetricsError::InvalidWindow`] if the window size is zero.
/// - [`MetricsError::DegenerateMetric`] if every window is skipped.
pub fn iqi(
    x: ArrayView2<'_, f64>,
    y: ArrayView2<'_, f64>,
    config: &IqiConfig,
) -> Result<f64, MetricsError> {
    if x.shape() != y.shape() {
        return Err(MetricsError::ShapeMismatch {
            left: x.shape().to_vec(),
            right: y.shape().to_vec(),
        });
    }
    if x.is_empty() {
        return Err(MetricsError::EmptyImage {
            shape: x.shape().to_vec(),
        });
    }
    if config.window() == 0 {
        return Err(MetricsError::InvalidWindow {
            metric: "IQI",
            size: 0,
            reason: "must be positive",
        });
    }

    let (h, w) = x.dim();
    let win = (config.window().min(h), config.window().min(w));
    let (sum, count, skipped) = x.windows(win).into_iter().zip(y.windows(win)).fold(
        (0.0, 0usize, 0usize),
        |(sum, count, skipped), (wx, wy)| match window_quality(wx, wy) {
            Some(q) => (sum + q, count + 1, skipped),
            None => (sum, count, skipped + 1),
        },
    );

    if count == 0 {
        return Err(MetricsError::DegenerateMetric {
            metric: "IQI",
            reason: format!("all {skipped} windows have zero variance"),
        });
    }
    if skipped > 0 {
        debug!(skipped, used = count, "IQI skipped flat windows");
    }
    Ok(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    fn textured(h: usize, w: usize) -> Array2<f64> {
        Array2::from_shape_fn((h, w), |(i, j)| ((i * 13 + j * 7) % 17) as f64 * 10.0 + 5.0)
    }

    #[test]
    fn test_identical_images_score_one() {
        let x = textured(12, 12);
        assert_relative_eq!(iqi(x.view(), x.view(), &IqiConfig::default()).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverted_contrast_is_negative() {
        let x = textured(10, 10);
        let y = x.mapv(|v| 300.0 - v);
        let q = iqi(x.view(), y.view(), &IqiConfig::default()).unwrap();
        assert!(q < 0.0 && q >= -1.0, "q = {q}");
    }

    #[test]
    fn test_single_window_hand_computed() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![[2.0, 2.0], [4.0, 4.0]];
        // μx = 2.5, μy = 3, σx² = 1.25, σy² = 1, σxy = 1
        let expected = 4.0 * 1.0 * 2.5 * 3.0 / ((1.25 + 1.0) * (6.25 + 9.0));
        let q = iqi(x.view(), y.view(), &IqiConfig::default()).unwrap();
        assert_relative_eq!(q, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_mean_fallback() {
        let x = array![[-1.0, 1.0], [-1.0, 1.0]];
        let y = array![[-2.0, 2.0], [-2.0, 2.0]];
        // means vanish: 2·σxy / (σx² + σy²) = 2·2 / (1 + 4)
        let q = iqi(x.view(), y.view(), &IqiConfig::default().with_window(2)).unwrap();
        assert_relative_eq!(q, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_images_are_degenerate() {
        let x = Array2::from_elem((9, 9), 50.0);
        let err = iqi(x.view(), x.view(), &IqiConfig::default()).unwrap_err();
        assert!(matches!(err, MetricsError::DegenerateMetric { metric: "IQI", .. }));
    }

    #[test]
    fn test_flat_windows_are_skipped() {
        // left half flat in both, right half textured
        let x = Array2::from_shape_fn((4, 8), |(i, j)| if j < 4 { 7.0 } else { (i * j) as f64 });
        let q = iqi(x.view(), x.view(), &IqiConfig::default().with_window(2)).unwrap();
        assert_relative_eq!(q, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let x = Array2::<f64>::zeros((4, 4));
        let y = Array2::<f64>::zeros((5, 4));
        assert!(matches!(
            iqi(x.view(), y.view(), &IqiConfig::default()),
            Err(MetricsError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let x = textured(4, 4);
        let config = IqiConfig::default().with_window(0);
        assert!(matches!(
            iqi(x.view(), x.view(), &config),
            Err(MetricsError::InvalidWindow { size: 0, .. })
        ));
    }
}
