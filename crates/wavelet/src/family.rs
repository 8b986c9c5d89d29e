//! Supported wavelet families.

use std::fmt;
use std::str::FromStr;

use crate::error::WaveletError;
use crate::filter::{
    BIOR1_1_DEC_LO, BIOR1_1_REC_LO, COIF1_REC_LO, DMEY_REC_LO, FilterBank, HAAR_REC_LO,
    SYM2_REC_LO,
};

/// The curated set of discrete wavelet families.
///
/// Each family decomposes with its first member (e.g. `db1` for
/// Daubechies). Continuous families are not supported.
///
/// # Example
///
/// ```
/// use tfuse_wavelet::WaveletFamily;
///
/// let family = WaveletFamily::from_name("Daubechies").unwrap();
/// assert_eq!(family, WaveletFamily::Daubechies);
/// assert_eq!(family.wavelet_name(), "db1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveletFamily {
    /// Haar.
    Haar,
    /// Daubechies, decomposed with `db1`.
    Daubechies,
    /// Symlets, decomposed with `sym2`.
    Symlets,
    /// Coiflets, decomposed with `coif1`.
    Coiflets,
    /// Biorthogonal, decomposed with `bior1.1`.
    Biorthogonal,
    /// Reverse biorthogonal, decomposed with `rbio1.1`.
    ReverseBiorthogonal,
    /// FIR approximation of the discrete Meyer wavelet.
    DiscreteMeyer,
}

impl Default for WaveletFamily {
    /// Returns `WaveletFamily::Daubechies` as the default family.
    fn default() -> Self {
        Self::Daubechies
    }
}

impl WaveletFamily {
    /// Every supported family, in library order.
    pub const ALL: [WaveletFamily; 7] = [
        Self::Haar,
        Self::Daubechies,
        Self::Symlets,
        Self::Coiflets,
        Self::Biorthogonal,
        Self::ReverseBiorthogonal,
        Self::DiscreteMeyer,
    ];

    /// Returns the short family name (`"db"`, `"coif"`, ...).
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::Daubechies => "db",
            Self::Symlets => "sym",
            Self::Coiflets => "coif",
            Self::Biorthogonal => "bior",
            Self::ReverseBiorthogonal => "rbio",
            Self::DiscreteMeyer => "dmey",
        }
    }

    /// Returns the descriptive family name.
    pub fn long_name(&self) -> &'static str {
        match self {
            Self::Haar => "Haar",
            Self::Daubechies => "Daubechies",
            Self::Symlets => "Symlets",
            Self::Coiflets => "Coiflets",
            Self::Biorthogonal => "Biorthogonal",
            Self::ReverseBiorthogonal => "Reverse biorthogonal",
            Self::DiscreteMeyer => "Discrete Meyer (FIR Approximation)",
        }
    }

    /// Returns the name of the family member used for decomposition.
    pub fn wavelet_name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::Daubechies => "db1",
            Self::Symlets => "sym2",
            Self::Coiflets => "coif1",
            Self::Biorthogonal => "bior1.1",
            Self::ReverseBiorthogonal => "rbio1.1",
            Self::DiscreteMeyer => "dmey",
        }
    }

    /// Returns the filter bank of the family member used for decomposition.
    pub fn filter_bank(&self) -> FilterBank {
        match self {
            Self::Haar | Self::Daubechies => FilterBank::orthogonal(&HAAR_REC_LO),
            Self::Symlets => FilterBank::orthogonal(&SYM2_REC_LO),
            Self::Coiflets => FilterBank::orthogonal(&COIF1_REC_LO),
            Self::Biorthogonal => FilterBank::new(BIOR1_1_DEC_LO.to_vec(), BIOR1_1_REC_LO.to_vec()),
            // reverse biorthogonal swaps the analysis and synthesis pairs
            Self::ReverseBiorthogonal => {
                FilterBank::new(BIOR1_1_REC_LO.to_vec(), BIOR1_1_DEC_LO.to_vec())
            }
            Self::DiscreteMeyer => FilterBank::orthogonal(&DMEY_REC_LO),
        }
    }

    /// Parses a family from a case-insensitive short, long or member name.
    ///
    /// # Supported Names
    ///
    /// | Short | Long | Member |
    /// |-------|------|--------|
    /// | `"haar"` | `"Haar"` | `"haar"` |
    /// | `"db"` | `"Daubechies"` | `"db1"` |
    /// | `"sym"` | `"Symlets"` | `"sym2"` |
    /// | `"coif"` | `"Coiflets"` | `"coif1"` |
    /// | `"bior"` | `"Biorthogonal"` | `"bior1.1"` |
    /// | `"rbio"` | `"Reverse biorthogonal"` | `"rbio1.1"` |
    /// | `"dmey"` | `"Discrete Meyer (FIR Approximation)"` | `"dmey"` |
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::InvalidWavelet`] for any other name,
    /// including the continuous families (`gaus`, `mexh`, `morl`, ...).
    pub fn from_name(name: &str) -> Result<Self, WaveletError> {
        let needle = name.trim();
        Self::ALL
            .into_iter()
            .find(|family| {
                [family.short_name(), family.long_name(), family.wavelet_name()]
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| WaveletError::InvalidWavelet(name.to_string()))
    }
}

impl FromStr for WaveletFamily {
    type Err = WaveletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for WaveletFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
