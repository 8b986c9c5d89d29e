//! # tfuse-wavelet
//!
//! Multi-level 2-D discrete wavelet transform of multi-channel images.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Array3 (h, w, c)"] -->|"decompose(view, family, levels)?"| B["CoefficientSet"]
//!     B -->|"zip_bands(&other, rule)?"| B
//!     B -->|"reconstruct(&set)"| A
//! ```
//!
//! ## Supported Families
//!
//! | Family | Member | Filter length |
//! |--------|--------|---------------|
//! | [`WaveletFamily::Haar`] | `haar` | 2 |
//! | [`WaveletFamily::Daubechies`] | `db1` | 2 |
//! | [`WaveletFamily::Symlets`] | `sym2` | 4 |
//! | [`WaveletFamily::Coiflets`] | `coif1` | 6 |
//! | [`WaveletFamily::Biorthogonal`] | `bior1.1` | 2 |
//! | [`WaveletFamily::ReverseBiorthogonal`] | `rbio1.1` | 2 |
//! | [`WaveletFamily::DiscreteMeyer`] | `dmey` | 62 |
//!
//! Boundaries use half-sample symmetric extension, so band sizes are
//! `floor((n + filter_len - 1) / 2)` per level and reconstruction is exact
//! (up to rounding) for every family except the FIR Meyer approximation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tfuse_wavelet::{WaveletFamily, decompose, reconstruct};
//!
//! let coeffs = decompose(image.view(), WaveletFamily::Daubechies, 4)?;
//! println!("approximation shape = {:?}", coeffs.approximation().dim());
//! let restored = reconstruct(&coeffs);
//! ```

mod dwt;
mod error;
mod family;
mod filter;
mod transform;

pub use error::WaveletError;
pub use family::WaveletFamily;
pub use filter::FilterBank;
pub use transform::{
    BandKind, BandLocation, CoefficientSet, DetailBands, decompose, max_level, reconstruct,
};
