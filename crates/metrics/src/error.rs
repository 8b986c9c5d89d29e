//! Error types for the tfuse-metrics crate.

/// Error type for all fallible operations in the tfuse-metrics crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetricsError {
    /// Returned when a metric input has no samples.
    #[error("metric input is empty (shape {shape:?})")]
    EmptyImage {
        /// Shape of the offending input.
        shape: Vec<usize>,
    },

    /// Returned when two metric inputs differ in shape.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the first input.
        left: Vec<usize>,
        /// Shape of the second input.
        right: Vec<usize>,
    },

    /// Returned when a metric is undefined for the given inputs.
    #[error("degenerate {metric}: {reason}")]
    DegenerateMetric {
        /// Metric name.
        metric: &'static str,
        /// Why the metric is undefined.
        reason: String,
    },

    /// Returned when a multi-channel image is scored as single-channel.
    #[error("image has {channels} channels but multichannel scoring is disabled")]
    ChannelMismatch {
        /// Number of channels found.
        channels: usize,
    },

    /// Returned when a window size cannot be used.
    #[error("invalid {metric} window size {size}: {reason}")]
    InvalidWindow {
        /// Metric name.
        metric: &'static str,
        /// Requested window size.
        size: usize,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Returned when the structural-similarity backend rejects its inputs.
    #[error("structural comparison failed: {reason}")]
    Comparison {
        /// Backend error message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_image() {
        let err = MetricsError::EmptyImage { shape: vec![0, 3] };
        assert_eq!(err.to_string(), "metric input is empty (shape [0, 3])");
    }

    #[test]
    fn error_shape_mismatch() {
        let err = MetricsError::ShapeMismatch {
            left: vec![4, 4],
            right: vec![4, 5],
        };
        assert_eq!(err.to_string(), "shape mismatch: [4, 4] vs [4, 5]");
    }

    #[test]
    fn error_degenerate_metric() {
        let err = MetricsError::DegenerateMetric {
            metric: "rSFe",
            reason: "reference spatial frequency is zero".into(),
        };
        assert_eq!(
            err.to_string(),
            "degenerate rSFe: reference spatial frequency is zero"
        );
    }

    #[test]
    fn error_channel_mismatch() {
        let err = MetricsError::ChannelMismatch { channels: 3 };
        assert_eq!(
            err.to_string(),
            "image has 3 channels but multichannel scoring is disabled"
        );
    }

    #[test]
    fn error_invalid_window() {
        let err = MetricsError::InvalidWindow {
            metric: "IQI",
            size: 0,
            reason: "must be positive",
        };
        assert_eq!(err.to_string(), "invalid IQI window size 0: must be positive");
    }

    #[test]
    fn error_comparison() {
        let err = MetricsError::Comparison {
            reason: "dimensions differ".into(),
        };
        assert_eq!(err.to_string(), "structural comparison failed: dimensions differ");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<MetricsError>();
    }
}
