//! Coefficient fusion rules.
//!
//! Every rule maps two same-shape `(height, width, channels)` bands to a
//! fused band of that shape and is applied unchanged to the approximation
//! and to every detail band.

mod deviation;
mod edge_entropy;
mod elementwise;
mod macd;

use ndarray::{Array3, ArrayView3};

pub use deviation::{DEFAULT_TILE, deviation, deviation_with_tile};
pub use edge_entropy::{edge, entropy};
pub use elementwise::{max, mean, min};
pub use macd::macd;

/// Signature shared by all coefficient fusion rules.
pub type CoefficientRule = fn(ArrayView3<'_, f64>, ArrayView3<'_, f64>) -> Array3<f64>;
