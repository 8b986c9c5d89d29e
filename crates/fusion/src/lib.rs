//! # tfuse-fusion
//!
//! Wavelet-domain fusion of two registered images.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Image a"] -->|"decompose"| CA["CoefficientSet a"]
//!     B["Image b"] -->|"decompose"| CB["CoefficientSet b"]
//!     CA --> F["fuse_coefficients(strategy)"]
//!     CB --> F
//!     F -->|"reconstruct"| R["Array3<f64>"]
//!     R -->|"normalize_to_u8"| O["Array3<u8>"]
//! ```
//!
//! ## Strategies
//!
//! | Strategy | Rule |
//! |----------|------|
//! | [`FusionStrategy::Mean`] | [`rules::mean`] |
//! | [`FusionStrategy::Min`] | [`rules::min`] |
//! | [`FusionStrategy::Max`] | [`rules::max`] |
//! | [`FusionStrategy::Entropy`] | [`rules::entropy`] |
//! | [`FusionStrategy::Macd`] | [`rules::macd`] |
//! | [`FusionStrategy::Edge`] | [`rules::edge`] |
//! | [`FusionStrategy::Deviation`] | [`rules::deviation`] |
//!
//! ## Quick Start
//!
//! ```ignore
//! use tfuse_fusion::{FusionStrategy, Image, fuse};
//! use tfuse_wavelet::WaveletFamily;
//!
//! let visible = Image::from_u8(visible_rgb)?;
//! let thermal = Image::from_u8(thermal_rgb)?;
//! let fused = fuse(&visible, &thermal, FusionStrategy::Macd, WaveletFamily::Daubechies)?;
//! ```

mod error;
mod image;
mod pipeline;
pub mod rules;
mod strategy;

pub use error::FusionError;
pub use image::Image;
pub use pipeline::{FusionConfig, fuse, fuse_coefficients, fuse_with_config, normalize_to_u8};
pub use rules::CoefficientRule;
pub use strategy::FusionStrategy;
