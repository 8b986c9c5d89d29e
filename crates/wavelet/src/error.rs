//! Error types for the tfuse-wavelet crate.

use crate::family::WaveletFamily;
use crate::transform::BandKind;

/// Error type for all fallible operations in the tfuse-wavelet crate.
///
/// Covers unsupported wavelet names, invalid decomposition parameters and
/// incompatible coefficient sets.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when a wavelet family name is not in the supported set.
    #[error("unsupported wavelet family: {0}")]
    InvalidWavelet(String),

    /// Returned when zero decomposition levels are requested.
    #[error("decomposition level must be >= 1, got {0}")]
    InvalidLevel(usize),

    /// Returned when the image to decompose has a zero-length axis.
    #[error("cannot decompose an empty image of shape {height}x{width}x{channels}")]
    EmptyImage {
        /// Image height.
        height: usize,
        /// Image width.
        width: usize,
        /// Number of channels.
        channels: usize,
    },

    /// Returned when two coefficient sets have different level counts.
    #[error("level count mismatch: {left} vs {right}")]
    LevelCountMismatch {
        /// Levels in the first set.
        left: usize,
        /// Levels in the second set.
        right: usize,
    },

    /// Returned when two coefficient sets were produced by different wavelets.
    #[error("wavelet family mismatch: {left} vs {right}")]
    FamilyMismatch {
        /// Family of the first set.
        left: WaveletFamily,
        /// Family of the second set.
        right: WaveletFamily,
    },

    /// Returned when corresponding bands disagree in shape.
    #[error("shape mismatch in {band} band at level {level}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Decomposition level (0 is the approximation).
        level: usize,
        /// Which band disagreed.
        band: BandKind,
        /// Shape on the left-hand side.
        left: (usize, usize, usize),
        /// Shape on the right-hand side.
        right: (usize, usize, usize),
    },
}
