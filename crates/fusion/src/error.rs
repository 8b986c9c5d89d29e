//! Error types for the tfuse-fusion crate.

use tfuse_wavelet::WaveletError;

/// Error type for all fallible operations in the tfuse-fusion crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FusionError {
    /// Returned when the two inputs differ in height or width.
    #[error("input shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// `(height, width, channels)` of the first input.
        left: (usize, usize, usize),
        /// `(height, width, channels)` of the second input.
        right: (usize, usize, usize),
    },

    /// Returned for an unknown strategy name, or for a strategy that
    /// cannot be applied to a single pair of inputs.
    #[error("invalid fusion strategy: {0}")]
    InvalidStrategy(String),

    /// Returned when an image has a zero-length axis.
    #[error("image is empty: {height}x{width}x{channels}")]
    EmptyImage {
        /// Image height.
        height: usize,
        /// Image width.
        width: usize,
        /// Number of channels.
        channels: usize,
    },

    /// Returned when an image contains NaN or infinite samples.
    #[error("non-finite sample at ({row}, {col}, {channel})")]
    NonFinite {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Channel index.
        channel: usize,
    },

    /// Wavelet transform error.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),
}
