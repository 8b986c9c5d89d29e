//! Bundled quality scores of a fused image.

use ndarray::{ArrayView2, Axis};
use serde::Serialize;
use tracing::debug;

use crate::entropy::entropy;
use crate::error::MetricsError;
use crate::iqi::{IqiConfig, iqi};
use crate::spatial::{relative_spatial_error, spatial, spatial_reference};
use crate::ssim::ssim;

/// Configuration for [`QualityScores::compute`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricsConfig {
    iqi: IqiConfig,
}

impl MetricsConfig {
    /// Set the IQI configuration.
    pub fn with_iqi(mut self, iqi: IqiConfig) -> Self {
        self.iqi = iqi;
        self
    }

    /// Returns the IQI configuration.
    pub fn iqi(&self) -> &IqiConfig {
        &self.iqi
    }
}

/// Quality scores of one fused image against its two sources.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QualityScores {
    /// Spatial frequency of the fused image.
    pub spatial_frequency: f64,
    /// Reference spatial frequency of the two sources.
    pub reference_spatial_frequency: f64,
    /// Relative spatial-frequency error (rSFe).
    pub relative_spatial_error: f64,
    /// SSIM of the first source against the fused image.
    pub ssim: f64,
    /// Shannon entropy of the fused image.
    pub entropy: f64,
    /// Image quality index of the first source against the fused image.
    pub iqi: f64,
}

impl QualityScores {
    /// Scores a grayscale fused image against grayscale sources.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::ShapeMismatch`] if the three images differ
    /// in shape, [`MetricsError::EmptyImage`] if they are empty, and
    /// [`MetricsError::DegenerateMetric`] if rSFe or IQI is undefined
    /// (flat sources).
    pub fn compute(
        fused: ArrayView2<'_, f64>,
        reference_a: ArrayView2<'_, f64>,
        reference_b: ArrayView2<'_, f64>,
        config: &MetricsConfig,
    ) -> Result<Self, MetricsError> {
        for shape in [reference_a.shape(), reference_b.shape()] {
            if shape != fused.shape() {
                return Err(MetricsError::ShapeMismatch {
                    left: fused.shape().to_vec(),
                    right: shape.to_vec(),
                });
            }
        }

        let spatial_frequency = spatial(fused)?;
        let reference_spatial_frequency = spatial_reference(reference_a, reference_b)?;
        let relative_spatial_error =
            relative_spatial_error(spatial_frequency, reference_spatial_frequency)?;
        let ssim = ssim(
            reference_a.insert_axis(Axis(2)),
            fused.insert_axis(Axis(2)),
            false,
        )?;
        let entropy = entropy(fused);
        let iqi = iqi(reference_a, fused, config.iqi())?;
        debug!(spatial_frequency, ssim, entropy, iqi, "scores computed");

        Ok(Self {
            spatial_frequency,
            reference_spatial_frequency,
            relative_spatial_error,
            ssim,
            entropy,
            iqi,
        })
    }
}
