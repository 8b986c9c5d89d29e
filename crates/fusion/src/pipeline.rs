//! Decompose, fuse, reconstruct, normalise.

use std::borrow::Cow;

use ndarray::{Array3, ArrayView3};
use tfuse_wavelet::{CoefficientSet, WaveletFamily, decompose, reconstruct};
use tracing::debug;

use crate::error::FusionError;
use crate::image::Image;
use crate::strategy::FusionStrategy;

/// Configuration for [`fuse_with_config`].
///
/// # Example
///
/// ```
/// use tfuse_fusion::FusionConfig;
///
/// let config = FusionConfig::default().with_levels(1);
/// assert_eq!(config.levels(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FusionConfig {
    levels: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self { levels: 4 }
    }
}

impl FusionConfig {
    /// Set the number of decomposition levels.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Returns the number of decomposition levels.
    pub fn levels(&self) -> usize {
        self.levels
    }
}

/// Fuses two images with the default configuration (4 levels).
///
/// # Errors
///
/// See [`fuse_with_config`].
pub fn fuse(
    a: &Image,
    b: &Image,
    strategy: FusionStrategy,
    family: WaveletFamily,
) -> Result<Array3<u8>, FusionError> {
    fuse_with_config(a, b, strategy, family, &FusionConfig::default())
}

/// Fuses two images into an 8-bit composite.
///
/// Both images are decomposed with `family`, every band pair is combined
/// by `strategy`, and the reconstruction is stretched to `0..=255`. When
/// the channel counts differ, both images are fused as luma.
///
/// # Errors
///
/// - [`FusionError::InvalidStrategy`] for [`FusionStrategy::All`].
/// - [`FusionError::ShapeMismatch`] if height or width differ.
/// - [`FusionError::Wavelet`] if the decomposition fails (zero levels).
pub fn fuse_with_config(
    a: &Image,
    b: &Image,
    strategy: FusionStrategy,
    family: WaveletFamily,
    config: &FusionConfig,
) -> Result<Array3<u8>, FusionError> {
    if strategy.rule().is_none() {
        return Err(strategy.not_applicable());
    }
    if (a.height(), a.width()) != (b.height(), b.width()) {
        return Err(FusionError::ShapeMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    let (a, b) = harmonize_channels(a, b);

    let ca = decompose(a.view(), family, config.levels())?;
    let cb = decompose(b.view(), family, config.levels())?;
    let fused = fuse_coefficients(&ca, &cb, strategy)?;
    let reconstructed = reconstruct(&fused);
    debug!(
        strategy = %strategy,
        wavelet = family.wavelet_name(),
        levels = config.levels(),
        "reconstructed fused image"
    );
    Ok(normalize_to_u8(reconstructed.view()))
}

/// Converts both images to luma when their channel counts differ.
fn harmonize_channels<'a>(a: &'a Image, b: &'a Image) -> (Cow<'a, Image>, Cow<'a, Image>) {
    if a.channels() == b.channels() {
        return (Cow::Borrowed(a), Cow::Borrowed(b));
    }
    debug!(
        left = a.channels(),
        right = b.channels(),
        "channel counts differ, fusing luma"
    );
    (Cow::Owned(a.to_luma()), Cow::Owned(b.to_luma()))
}

/// Applies `strategy` to the approximation and to every detail band.
///
/// # Errors
///
/// Returns [`FusionError::InvalidStrategy`] for [`FusionStrategy::All`]
/// and [`FusionError::Wavelet`] if the sets are incompatible.
pub fn fuse_coefficients(
    a: &CoefficientSet,
    b: &CoefficientSet,
    strategy: FusionStrategy,
) -> Result<CoefficientSet, FusionError> {
    let rule = strategy.rule().ok_or_else(|| strategy.not_applicable())?;
    let fused = a.zip_bands(b, |loc, x, y| {
        debug!(level = loc.level, band = %loc.kind, "fusing band");
        rule(x, y)
    })?;
    Ok(fused)
}

/// Min-max stretches samples to `0..=255` and truncates to `u8`.
///
/// A (near-)constant input has no range to stretch; it becomes a
/// constant image of its rounded mean, clamped to `0..=255`.
pub fn normalize_to_u8(data: ArrayView3<'_, f64>) -> Array3<u8> {
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range <= 1e-9 * max.abs().max(1.0) {
        let level = tfuse_stats::mean(data.iter()).round().clamp(0.0, 255.0) as u8;
        debug!(min, max, level, "degenerate range, constant output");
        return Array3::from_elem(data.raw_dim(), level);
    }
    data.mapv(|v| ((v - min) / range * 255.0).clamp(0.0, 255.0) as u8)
}
