//! Spatial filters over 2-D planes.
//!
//! | Function | Boundary | Output shape |
//! |----------|----------|--------------|
//! | [`window_sums`] | zero padding | same as input |
//! | [`sobel_magnitude`] | reflect | same as input |

use ndarray::{Array2, ArrayView2};

/// Maps an out-of-range index onto `0..len` by half-sample symmetric
/// reflection (`c b a | a b c | c b a`), repeating as often as needed.
///
/// # Panics
///
/// Panics if `len` is zero.
pub fn reflect_index(index: isize, len: usize) -> usize {
    assert!(len > 0, "reflect_index: len must be positive");
    let period = 2 * len as isize;
    let m = index.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Summed-area table with one row and column of leading zeros.
fn integral_image(plane: ArrayView2<'_, f64>) -> Array2<f64> {
    let (h, w) = plane.dim();
    let mut table = Array2::<f64>::zeros((h + 1, w + 1));
    for i in 0..h {
        let mut row_sum = 0.0;
        for j in 0..w {
            row_sum += plane[[i, j]];
            table[[i + 1, j + 1]] = table[[i, j + 1]] + row_sum;
        }
    }
    table
}

/// Sum over rows `r0..r1` and columns `c0..c1` (exclusive ends).
fn rect_sum(table: &Array2<f64>, r0: usize, r1: usize, c0: usize, c1: usize) -> f64 {
    table[[r1, c1]] - table[[r0, c1]] - table[[r1, c0]] + table[[r0, c0]]
}

/// Sum over a centred `size × size` window, treating samples outside the
/// plane as zero.
pub fn window_sums(plane: ArrayView2<'_, f64>, size: usize) -> Array2<f64> {
    let (h, w) = plane.dim();
    let table = integral_image(plane);
    let before = size / 2;
    let after = size - 1 - before;
    Array2::from_shape_fn((h, w), |(i, j)| {
        let r0 = i.saturating_sub(before);
        let r1 = (i + after + 1).min(h);
        let c0 = j.saturating_sub(before);
        let c1 = (j + after + 1).min(w);
        rect_sum(&table, r0, r1, c0, c1)
    })
}

/// Sobel gradient magnitude, `sqrt((gx² + gy²) / 2)`.
///
/// Each directional kernel is `[1, 2, 1] / 4` smoothing across the
/// derivative `[1, 0, -1]`, with reflected borders.
pub fn sobel_magnitude(plane: ArrayView2<'_, f64>) -> Array2<f64> {
    let (h, w) = plane.dim();
    if h == 0 || w == 0 {
        return Array2::zeros((h, w));
    }
    let at = |i: isize, j: isize| plane[[reflect_index(i, h), reflect_index(j, w)]];
    Array2::from_shape_fn((h, w), |(i, j)| {
        let (i, j) = (i as isize, j as isize);
        // derivative across rows, smoothed along columns
        let gx = ((at(i - 1, j - 1) + 2.0 * at(i - 1, j) + at(i - 1, j + 1))
            - (at(i + 1, j - 1) + 2.0 * at(i + 1, j) + at(i + 1, j + 1)))
            / 4.0;
        // derivative across columns, smoothed along rows
        let gy = ((at(i - 1, j - 1) + 2.0 * at(i, j - 1) + at(i + 1, j - 1))
            - (at(i - 1, j + 1) + 2.0 * at(i, j + 1) + at(i + 1, j + 1)))
            / 4.0;
        ((gx * gx + gy * gy) / 2.0).sqrt()
    })
}
