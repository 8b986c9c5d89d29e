//! Wavelet filter banks.

use std::f64::consts::FRAC_1_SQRT_2;

/// Reconstruction low-pass filter of the Haar wavelet (also `db1`).
pub(crate) const HAAR_REC_LO: [f64; 2] = [FRAC_1_SQRT_2, FRAC_1_SQRT_2];

/// Reconstruction low-pass filter of `sym2` (identical to `db2`).
pub(crate) const SYM2_REC_LO: [f64; 4] = [
    0.48296291314469025,
    0.836516303737469,
    0.22414386804185735,
    -0.12940952255092145,
];

/// Reconstruction low-pass filter of `coif1`.
pub(crate) const COIF1_REC_LO: [f64; 6] = [
    -0.0727326195128539,
    0.3378976624578092,
    0.8525720202122554,
    0.38486484686420286,
    -0.0727326195128539,
    -0.01565572813546454,
];

/// Decomposition low-pass filter of `bior1.1`.
pub(crate) const BIOR1_1_DEC_LO: [f64; 2] = [FRAC_1_SQRT_2, FRAC_1_SQRT_2];

/// Reconstruction low-pass filter of `bior1.1`.
pub(crate) const BIOR1_1_REC_LO: [f64; 2] = [FRAC_1_SQRT_2, FRAC_1_SQRT_2];

/// Reconstruction low-pass filter of the FIR approximation of the discrete
/// Meyer wavelet (`dmey`). Only approximately orthogonal.
pub(crate) const DMEY_REC_LO: [f64; 62] = [
    -1.009999956941423e-12,
    8.519459636796214e-09,
    -1.111944952595278e-08,
    -1.0798819539621958e-08,
    6.066975741351135e-08,
    -1.0866516536735883e-07,
    8.200680650386481e-08,
    1.1783004497663934e-07,
    -5.506340565252278e-07,
    1.1307947017916706e-06,
    -1.489549216497156e-06,
    7.367572885903746e-07,
    3.20544191334478e-06,
    -1.6312699734552807e-05,
    6.554305930575149e-05,
    -0.0006011502343516092,
    -0.002704672124643725,
    0.002202534100911002,
    0.006045814097323304,
    -0.006387718318497156,
    -0.011061496392513451,
    0.015270015130934803,
    0.017423434103729693,
    -0.03213079399021176,
    -0.024348745906078023,
    0.0637390243228016,
    0.030655091960824263,
    -0.13284520043622938,
    -0.035087555656258346,
    0.44459300275757724,
    0.7445855923188063,
    0.44459300275757724,
    -0.035087555656258346,
    -0.13284520043622938,
    0.030655091960824263,
    0.0637390243228016,
    -0.024348745906078023,
    -0.03213079399021176,
    0.017423434103729693,
    0.015270015130934803,
    -0.011061496392513451,
    -0.006387718318497156,
    0.006045814097323304,
    0.002202534100911002,
    -0.002704672124643725,
    -0.0006011502343516092,
    6.554305930575149e-05,
    -1.6312699734552807e-05,
    3.20544191334478e-06,
    7.367572885903746e-07,
    -1.489549216497156e-06,
    1.1307947017916706e-06,
    -5.506340565252278e-07,
    1.1783004497663934e-07,
    8.200680650386481e-08,
    -1.0866516536735883e-07,
    6.066975741351135e-08,
    -1.0798819539621958e-08,
    -1.111944952595278e-08,
    8.519459636796214e-09,
    -1.009999956941423e-12,
    0.0,
];

/// The four filters of a two-channel wavelet filter bank.
///
/// High-pass filters are derived from the low-pass pair by the quadrature
/// mirror relationship:
/// `rec_hi[i] = (-1)^i · dec_lo[i]`, `dec_hi[i] = (-1)^(i+1) · rec_lo[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBank {
    dec_lo: Vec<f64>,
    dec_hi: Vec<f64>,
    rec_lo: Vec<f64>,
    rec_hi: Vec<f64>,
}

impl FilterBank {
    /// Builds a (bi)orthogonal bank from its two low-pass filters.
    ///
    /// # Panics
    ///
    /// Panics if the filters differ in length or have odd length.
    pub(crate) fn new(dec_lo: Vec<f64>, rec_lo: Vec<f64>) -> Self {
        assert_eq!(dec_lo.len(), rec_lo.len(), "filter lengths must match");
        assert!(
            dec_lo.len() % 2 == 0,
            "filter length must be even, got {}",
            dec_lo.len()
        );
        let sign = |i: usize| if i % 2 == 0 { 1.0 } else { -1.0 };
        let rec_hi = dec_lo.iter().enumerate().map(|(i, v)| sign(i) * v).collect();
        let dec_hi = rec_lo.iter().enumerate().map(|(i, v)| -sign(i) * v).collect();
        Self {
            dec_lo,
            dec_hi,
            rec_lo,
            rec_hi,
        }
    }

    /// Builds an orthogonal bank; the decomposition filter is the
    /// time-reversed reconstruction filter.
    pub(crate) fn orthogonal(rec_lo: &[f64]) -> Self {
        let dec_lo = rec_lo.iter().rev().copied().collect();
        Self::new(dec_lo, rec_lo.to_vec())
    }

    /// Returns the filter length.
    pub fn len(&self) -> usize {
        self.dec_lo.len()
    }

    /// Returns `true` if the bank has no taps (never for a valid bank).
    pub fn is_empty(&self) -> bool {
        self.dec_lo.is_empty()
    }

    /// Decomposition low-pass filter.
    pub fn dec_lo(&self) -> &[f64] {
        &self.dec_lo
    }

    /// Decomposition high-pass filter.
    pub fn dec_hi(&self) -> &[f64] {
        &self.dec_hi
    }

    /// Reconstruction low-pass filter.
    pub fn rec_lo(&self) -> &[f64] {
        &self.rec_lo
    }

    /// Reconstruction high-pass filter.
    pub fn rec_hi(&self) -> &[f64] {
        &self.rec_hi
    }
}
