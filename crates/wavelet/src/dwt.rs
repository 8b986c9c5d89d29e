//! Single-level discrete wavelet transform along one axis.
//!
//! Signals are extended by half-sample symmetric reflection. A length `n`
//! signal and a length `f` filter give `floor((n + f - 1) / 2)`
//! coefficients per sub-band; synthesis keeps the `2m - f + 2` central
//! samples of the upsampled convolution, which is `n` or `n + 1`.

use ndarray::{Array3, ArrayView3, Axis, Zip, aview1};
use tfuse_stats::filter::reflect_index;

use crate::filter::FilterBank;

/// Number of coefficients produced by one analysis step.
pub(crate) fn analysis_len(n: usize, filter_len: usize) -> usize {
    (n + filter_len - 1) / 2
}

/// Number of samples produced by one synthesis step.
pub(crate) fn synthesis_len(m: usize, filter_len: usize) -> usize {
    (2 * m + 2).saturating_sub(filter_len)
}

fn dwt_1d(x: &[f64], bank: &FilterBank, approx: &mut [f64], detail: &mut [f64]) {
    let n = x.len();
    let (lo, hi) = (bank.dec_lo(), bank.dec_hi());
    for (k, (a, d)) in approx.iter_mut().zip(detail.iter_mut()).enumerate() {
        let centre = 2 * k as isize + 1;
        let (mut sa, mut sd) = (0.0, 0.0);
        for (j, (l, h)) in lo.iter().zip(hi).enumerate() {
            let v = x[reflect_index(centre - j as isize, n)];
            sa += l * v;
            sd += h * v;
        }
        *a = sa;
        *d = sd;
    }
}

fn idwt_1d(approx: &[f64], detail: &[f64], bank: &FilterBank, out: &mut [f64]) {
    let m = approx.len();
    let f = bank.len();
    let (lo, hi) = (bank.rec_lo(), bank.rec_hi());
    for (o, y) in out.iter_mut().enumerate() {
        let t = o + f - 2;
        // coefficients k with 0 <= t - 2k < f
        let k_min = (t + 1).saturating_sub(f).div_ceil(2);
        let k_max = (t / 2).min(m - 1);
        let mut sum = 0.0;
        for k in k_min..=k_max {
            let g = t - 2 * k;
            sum += approx[k] * lo[g] + detail[k] * hi[g];
        }
        *y = sum;
    }
}

/// Splits `data` along `axis` into low-pass and high-pass halves.
pub(crate) fn analyze_axis(
    data: ArrayView3<'_, f64>,
    axis: Axis,
    bank: &FilterBank,
) -> (Array3<f64>, Array3<f64>) {
    let n = data.len_of(axis);
    let m = analysis_len(n, bank.len());
    let mut shape = data.raw_dim();
    shape[axis.index()] = m;
    let mut approx = Array3::<f64>::zeros(shape);
    let mut detail = Array3::<f64>::zeros(shape);

    let mut signal = vec![0.0; n];
    let mut a_buf = vec![0.0; m];
    let mut d_buf = vec![0.0; m];
    Zip::from(data.lanes(axis))
        .and(approx.lanes_mut(axis))
        .and(detail.lanes_mut(axis))
        .for_each(|lane, mut a, mut d| {
            signal
                .iter_mut()
                .zip(lane.iter())
                .for_each(|(dst, src)| *dst = *src);
            dwt_1d(&signal, bank, &mut a_buf, &mut d_buf);
            a.assign(&aview1(&a_buf));
            d.assign(&aview1(&d_buf));
        });
    (approx, detail)
}

/// Merges low-pass and high-pass halves along `axis`.
///
/// # Panics
///
/// Panics if `approx` and `detail` differ in shape.
pub(crate) fn synthesize_axis(
    approx: ArrayView3<'_, f64>,
    detail: ArrayView3<'_, f64>,
    axis: Axis,
    bank: &FilterBank,
) -> Array3<f64> {
    assert_eq!(
        approx.shape(),
        detail.shape(),
        "sub-bands must share a shape"
    );
    let m = approx.len_of(axis);
    let n = synthesis_len(m, bank.len());
    let mut shape = approx.raw_dim();
    shape[axis.index()] = n;
    let mut out = Array3::<f64>::zeros(shape);

    let mut a_buf = vec![0.0; m];
    let mut d_buf = vec![0.0; m];
    let mut signal = vec![0.0; n];
    Zip::from(approx.lanes(axis))
        .and(detail.lanes(axis))
        .and(out.lanes_mut(axis))
        .for_each(|a, d, mut o| {
            a_buf.iter_mut().zip(a.iter()).for_each(|(dst, src)| *dst = *src);
            d_buf.iter_mut().zip(d.iter()).for_each(|(dst, src)| *dst = *src);
            idwt_1d(&a_buf, &d_buf, bank, &mut signal);
            o.assign(&aview1(&signal));
        });
    out
}
