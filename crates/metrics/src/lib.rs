//! # tfuse-metrics
//!
//! Quality metrics for scoring a fused image against its two sources.
//!
//! ## Metrics
//!
//! | Function | Inputs | Range |
//! |----------|--------|-------|
//! | [`entropy`] | fused | `>= 0` bits |
//! | [`spatial`] | fused | `>= 0` |
//! | [`spatial_reference`] | both sources | `>= 0` |
//! | [`relative_spatial_error`] | `sf`, `sf_ref` | signed ratio |
//! | [`iqi`] | image, reference | `[-1, 1]` |
//! | [`ssim`] | two `(h, w, c)` images | `[-1, 1]`, via `image_compare` |
//!
//! [`QualityScores::compute`] evaluates all of them on grayscale inputs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tfuse_metrics::{MetricsConfig, QualityScores};
//!
//! let scores = QualityScores::compute(fused.view(), visible.view(), thermal.view(), &MetricsConfig::default())?;
//! println!("SF = {:.3}, SSIM = {:.3}", scores.spatial_frequency, scores.ssim);
//! ```

mod entropy;
mod error;
mod iqi;
mod scores;
mod spatial;
mod ssim;

pub use entropy::entropy;
pub use error::MetricsError;
pub use iqi::{IqiConfig, iqi};
pub use scores::{MetricsConfig, QualityScores};
pub use spatial::{relative_spatial_error, spatial, spatial_reference};
pub use ssim::ssim;
