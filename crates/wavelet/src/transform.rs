//! Multi-level 2-D decomposition and reconstruction of multi-channel images.

use std::fmt;

use ndarray::{Array3, ArrayView3, Axis, s};
use tracing::{debug, warn};

use crate::dwt::{analyze_axis, synthesize_axis};
use crate::error::WaveletError;
use crate::family::WaveletFamily;

/// Identifies one of the four sub-bands of a decomposition level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BandKind {
    /// Low-pass along both axes (coarsest level only).
    Approximation,
    /// High-pass along rows, low-pass along columns.
    Horizontal,
    /// Low-pass along rows, high-pass along columns.
    Vertical,
    /// High-pass along both axes.
    Diagonal,
}

impl fmt::Display for BandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Approximation => "approximation",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
        };
        f.write_str(name)
    }
}

/// Position of a band inside a [`CoefficientSet`].
///
/// Level 0 is the approximation; detail levels are numbered from 1
/// (coarsest) to `n_levels` (finest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandLocation {
    /// Level index.
    pub level: usize,
    /// Band kind.
    pub kind: BandKind,
}

impl BandLocation {
    /// Returns `true` for the approximation band.
    pub fn is_approximation(&self) -> bool {
        self.kind == BandKind::Approximation
    }
}

/// Horizontal, vertical and diagonal detail bands of one level.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailBands {
    horizontal: Array3<f64>,
    vertical: Array3<f64>,
    diagonal: Array3<f64>,
}

impl DetailBands {
    /// Returns the horizontal detail band.
    pub fn horizontal(&self) -> &Array3<f64> {
        &self.horizontal
    }

    /// Returns the vertical detail band.
    pub fn vertical(&self) -> &Array3<f64> {
        &self.vertical
    }

    /// Returns the diagonal detail band.
    pub fn diagonal(&self) -> &Array3<f64> {
        &self.diagonal
    }

    /// Returns the band of the given kind, or `None` for
    /// [`BandKind::Approximation`].
    pub fn get(&self, kind: BandKind) -> Option<&Array3<f64>> {
        match kind {
            BandKind::Approximation => None,
            BandKind::Horizontal => Some(&self.horizontal),
            BandKind::Vertical => Some(&self.vertical),
            BandKind::Diagonal => Some(&self.diagonal),
        }
    }

    /// Shape shared by all three bands.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.horizontal.dim()
    }
}

/// Result of a multi-level decomposition.
///
/// Holds one approximation band and `n_levels` detail triples ordered
/// coarsest first, together with the family and the shape of the
/// decomposed image.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientSet {
    approximation: Array3<f64>,
    details: Vec<DetailBands>,
    family: WaveletFamily,
    image_shape: (usize, usize, usize),
}

impl CoefficientSet {
    /// Returns the number of detail levels.
    pub fn n_levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the approximation band.
    pub fn approximation(&self) -> &Array3<f64> {
        &self.approximation
    }

    /// Returns all detail levels, coarsest first.
    pub fn details(&self) -> &[DetailBands] {
        &self.details
    }

    /// Returns the detail bands at `level` (1 = coarsest).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&DetailBands> {
        level.checked_sub(1).and_then(|i| self.details.get(i))
    }

    /// Returns the wavelet family used for the decomposition.
    pub fn family(&self) -> WaveletFamily {
        self.family
    }

    /// Returns the `(height, width, channels)` of the decomposed image.
    pub fn image_shape(&self) -> (usize, usize, usize) {
        self.image_shape
    }

    /// Checks that `other` has the same family, level count and band shapes.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::LevelCountMismatch`],
    /// [`WaveletError::FamilyMismatch`] or [`WaveletError::ShapeMismatch`]
    /// on the first disagreement.
    pub fn check_compatible(&self, other: &CoefficientSet) -> Result<(), WaveletError> {
        if self.n_levels() != other.n_levels() {
            return Err(WaveletError::LevelCountMismatch {
                left: self.n_levels(),
                right: other.n_levels(),
            });
        }
        if self.family != other.family {
            return Err(WaveletError::FamilyMismatch {
                left: self.family,
                right: other.family,
            });
        }
        check_shape(
            BandLocation {
                level: 0,
                kind: BandKind::Approximation,
            },
            self.approximation.dim(),
            other.approximation.dim(),
        )?;
        for (i, (l, r)) in self.details.iter().zip(&other.details).enumerate() {
            for kind in DETAIL_KINDS {
                let (Some(lb), Some(rb)) = (l.get(kind), r.get(kind)) else {
                    continue;
                };
                check_shape(BandLocation { level: i + 1, kind }, lb.dim(), rb.dim())?;
            }
        }
        Ok(())
    }

    /// Combines two compatible coefficient sets band by band.
    ///
    /// `rule` is called once for the approximation and once for every
    /// detail band, in that order, coarsest level first. The result keeps
    /// the family and image shape of `self`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`CoefficientSet::check_compatible`], or
    /// [`WaveletError::ShapeMismatch`] if `rule` returns an array whose
    /// shape differs from its inputs.
    pub fn zip_bands<F>(&self, other: &CoefficientSet, mut rule: F) -> Result<Self, WaveletError>
    where
        F: FnMut(BandLocation, ArrayView3<'_, f64>, ArrayView3<'_, f64>) -> Array3<f64>,
    {
        self.check_compatible(other)?;

        let mut apply = |loc: BandLocation, a: &Array3<f64>, b: &Array3<f64>| {
            let out = rule(loc, a.view(), b.view());
            check_shape(loc, a.dim(), out.dim())?;
            Ok::<_, WaveletError>(out)
        };

        let approximation = apply(
            BandLocation {
                level: 0,
                kind: BandKind::Approximation,
            },
            &self.approximation,
            &other.approximation,
        )?;

        let mut details = Vec::with_capacity(self.details.len());
        for (i, (l, r)) in self.details.iter().zip(&other.details).enumerate() {
            let level = i + 1;
            details.push(DetailBands {
                horizontal: apply(
                    BandLocation {
                        level,
                        kind: BandKind::Horizontal,
                    },
                    &l.horizontal,
                    &r.horizontal,
                )?,
                vertical: apply(
                    BandLocation {
                        level,
                        kind: BandKind::Vertical,
                    },
                    &l.vertical,
                    &r.vertical,
                )?,
                diagonal: apply(
                    BandLocation {
                        level,
                        kind: BandKind::Diagonal,
                    },
                    &l.diagonal,
                    &r.diagonal,
                )?,
            });
        }

        Ok(Self {
            approximation,
            details,
            family: self.family,
            image_shape: self.image_shape,
        })
    }
}

const DETAIL_KINDS: [BandKind; 3] = [BandKind::Horizontal, BandKind::Vertical, BandKind::Diagonal];

fn check_shape(
    loc: BandLocation,
    left: (usize, usize, usize),
    right: (usize, usize, usize),
) -> Result<(), WaveletError> {
    if left != right {
        return Err(WaveletError::ShapeMismatch {
            level: loc.level,
            band: loc.kind,
            left,
            right,
        });
    }
    Ok(())
}

/// Highest level at which a signal of length `n` still spans a full
/// filter of length `filter_len`: `floor(log2(n / (filter_len - 1)))`.
///
/// # Example
///
/// ```
/// use tfuse_wavelet::max_level;
///
/// assert_eq!(max_level(256, 2), 8);
/// assert_eq!(max_level(256, 6), 5);
/// assert_eq!(max_level(3, 6), 0);
/// ```
pub fn max_level(n: usize, filter_len: usize) -> usize {
    if filter_len <= 1 || n < filter_len - 1 {
        return 0;
    }
    let ratio = n as f64 / (filter_len - 1) as f64;
    ratio.log2().floor() as usize
}

/// Decomposes a `(height, width, channels)` image into `levels` levels.
///
/// Each level filters the previous approximation along rows, then along
/// columns, independently per channel. Requesting more levels than
/// [`max_level`] allows is permitted but logged, since boundary effects
/// dominate the coarse bands.
///
/// # Errors
///
/// Returns [`WaveletError::EmptyImage`] if any axis is empty and
/// [`WaveletError::InvalidLevel`] if `levels` is zero.
pub fn decompose(
    image: ArrayView3<'_, f64>,
    family: WaveletFamily,
    levels: usize,
) -> Result<CoefficientSet, WaveletError> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Err(WaveletError::EmptyImage {
            height,
            width,
            channels,
        });
    }
    if levels == 0 {
        return Err(WaveletError::InvalidLevel(levels));
    }

    let bank = family.filter_bank();
    let limit = max_level(height.min(width), bank.len());
    if levels > limit {
        warn!(
            requested = levels,
            max = limit,
            wavelet = family.wavelet_name(),
            height,
            width,
            "decomposition level exceeds the useful maximum"
        );
    }

    let mut current = image.to_owned();
    let mut details = Vec::with_capacity(levels);
    for level in 1..=levels {
        let (lo, hi) = analyze_axis(current.view(), Axis(0), &bank);
        let (ll, vertical) = analyze_axis(lo.view(), Axis(1), &bank);
        let (horizontal, diagonal) = analyze_axis(hi.view(), Axis(1), &bank);
        debug!(level, shape = ?ll.dim(), "decomposed level");
        details.push(DetailBands {
            horizontal,
            vertical,
            diagonal,
        });
        current = ll;
    }
    details.reverse();

    Ok(CoefficientSet {
        approximation: current,
        details,
        family,
        image_shape: (height, width, channels),
    })
}

/// Inverts [`decompose`], returning an array of the original image shape.
///
/// Where the running approximation is one sample longer than the next
/// detail level (odd intermediate sizes), the extra trailing sample is
/// dropped before synthesis.
pub fn reconstruct(coeffs: &CoefficientSet) -> Array3<f64> {
    let bank = coeffs.family.filter_bank();
    let mut current = coeffs.approximation.clone();
    for detail in &coeffs.details {
        let (h, w, _) = detail.dim();
        let approx = current.slice(s![..h, ..w, ..]);
        let lo = synthesize_axis(approx, detail.vertical.view(), Axis(1), &bank);
        let hi = synthesize_axis(detail.horizontal.view(), detail.diagonal.view(), Axis(1), &bank);
        current = synthesize_axis(lo.view(), hi.view(), Axis(0), &bank);
    }
    let (h, w, _) = coeffs.image_shape;
    let (rows, cols, _) = current.dim();
    current.slice(s![..h.min(rows), ..w.min(cols), ..]).to_owned()
}
