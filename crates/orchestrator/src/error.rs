//! Orchestration error types.

use tfuse_fusion::{FusionError, FusionStrategy};
use tfuse_metrics::MetricsError;

/// Errors that can occur while running a batch of strategies.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrchestratorError {
    /// Fusing with a strategy failed.
    #[error("fusion with {strategy} failed: {source}")]
    Fusion {
        strategy: FusionStrategy,
        #[source]
        source: FusionError,
    },

    /// Scoring the result of a strategy failed.
    #[error("scoring {strategy} failed: {source}")]
    Metrics {
        strategy: FusionStrategy,
        #[source]
        source: MetricsError,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// The worker thread ended without delivering a report.
    #[error("orchestration thread ended without a report")]
    Disconnected,
}

impl OrchestratorError {
    /// The strategy that failed, if the error is tied to one.
    pub fn strategy(&self) -> Option<FusionStrategy> {
        match self {
            Self::Fusion { strategy, .. } | Self::Metrics { strategy, .. } => Some(*strategy),
            Self::Serialization { .. } | Self::Disconnected => None,
        }
    }
}
