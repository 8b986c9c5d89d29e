//! Spatial frequency.
//!
//! Four directional terms are averaged over all `h·w` samples; the two
//! diagonal terms are further divided by `√2`. The metric is the square
//! root of their product.

use std::f64::consts::SQRT_2;

use ndarray::{ArrayView2, Zip, s};

use crate::error::MetricsError;

/// Current/previous sample pairs for the row, column, main-diagonal and
/// secondary-diagonal directions.
fn neighbour_pairs<'a>(
    plane: &ArrayView2<'a, f64>,
) -> [(ArrayView2<'a, f64>, ArrayView2<'a, f64>); 4] {
    let p = *plane;
    [
        // x[i, j] - x[i, j - 1]
        (p.slice_move(s![.., 1..]), p.slice_move(s![.., ..-1])),
        // x[i, j] - x[i - 1, j]
        (p.slice_move(s![1.., ..]), p.slice_move(s![..-1, ..])),
        // x[i, j] - x[i - 1, j - 1]
        (p.slice_move(s![1.., 1..]), p.slice_move(s![..-1, ..-1])),
        // x[i, j] - x[i - 1, j + 1]
        (p.slice_move(s![1.., ..-1]), p.slice_move(s![..-1, 1..])),
    ]
}

fn combine(terms: [f64; 4], n: f64) -> f64 {
    let [row, col, dm, ds] = terms;
    let row = row / n;
    let col = col / n;
    let dm = dm / n / SQRT_2;
    let ds = ds / n / SQRT_2;
    (row * col * dm * ds).sqrt()
}

fn ensure_non_empty(x: &ArrayView2<'_, f64>) -> Result<(), MetricsError> {
    if x.is_empty() {
        return Err(MetricsError::EmptyImage {
            shape: x.shape().to_vec(),
        });
    }
    Ok(())
}

/// Spatial frequency of a grayscale image.
///
/// # Errors
///
/// Returns [`MetricsError::EmptyImage`] if `x` has no samples.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use tfuse_metrics::spatial;
///
/// let flat = Array2::from_elem((8, 8), 42.0);
/// assert_eq!(spatial(flat.view()).unwrap(), 0.0);
/// ```
pub fn spatial(x: ArrayView2<'_, f64>) -> Result<f64, MetricsError> {
    ensure_non_empty(&x)?;
    let terms = neighbour_pairs(&x).map(|(cur, prev)| {
        Zip::from(&cur)
            .and(&prev)
            .fold(0.0, |acc, &c, &p| acc + (c - p) * (c - p))
    });
    Ok(combine(terms, x.len() as f64))
}

/// Reference spatial frequency of two source images.
///
/// Each directional term takes the larger of the two squared differences
/// at every position.
///
/// # Errors
///
/// Returns [`MetricsError::ShapeMismatch`] if the shapes differ and
/// [`MetricsError::EmptyImage`] if they are empty.
pub fn spatial_reference(
    x: ArrayView2<'_, f64>,
    y: ArrayView2<'_, f64>,
) -> Result<f64, MetricsError> {
    if x.shape() != y.shape() {
        return Err(MetricsError::ShapeMismatch {
            left: x.shape().to_vec(),
            right: y.shape().to_vec(),
        });
    }
    ensure_non_empty(&x)?;
    let px = neighbour_pairs(&x);
    let py = neighbour_pairs(&y);
    let mut terms = [0.0; 4];
    for (term, ((xc, xp), (yc, yp))) in terms.iter_mut().zip(px.iter().zip(py.iter())) {
        *term = Zip::from(xc)
            .and(xp)
            .and(yc)
            .and(yp)
            .fold(0.0, |acc, &a, &b, &c, &d| {
                acc + ((a - b) * (a - b)).max((c - d) * (c - d))
            });
    }
    Ok(combine(terms, x.len() as f64))
}

/// Relative spatial-frequency error, `(sf - sf_ref) / sf_ref`.
///
/// Positive values indicate an over-fused image (distortion or noise
/// introduced), negative values an under-fused one (information lost).
///
/// # Errors
///
/// Returns [`MetricsError::DegenerateMetric`] if `sf_ref` is zero.
pub fn relative_spatial_error(sf: f64, sf_ref: f64) -> Result<f64, MetricsError> {
    if sf_ref == 0.0 {
        return Err(MetricsError::DegenerateMetric {
            metric: "rSFe",
            reason: "reference spatial frequency is zero".into(),
        });
    }
    Ok((sf - sf_ref) / sf_ref)
}
