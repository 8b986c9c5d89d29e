//! Orchestration configuration.

use tfuse_fusion::FusionConfig;
use tfuse_metrics::MetricsConfig;

/// Configuration for [`run`](crate::run) and friends.
///
/// # Example
///
/// ```
/// use tfuse_fusion::FusionConfig;
/// use tfuse_orchestrator::OrchestratorConfig;
///
/// let config = OrchestratorConfig::default()
///     .with_fusion(FusionConfig::default().with_levels(2))
///     .with_parallel(false);
/// assert_eq!(config.fusion().levels(), 2);
/// assert!(!config.parallel());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrchestratorConfig {
    fusion: FusionConfig,
    metrics: MetricsConfig,
    parallel: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fusion: FusionConfig::default(),
            metrics: MetricsConfig::default(),
            parallel: true,
        }
    }
}

impl OrchestratorConfig {
    /// Set the fusion configuration.
    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = fusion;
        self
    }

    /// Set the metrics configuration.
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run strategies of a batch on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the fusion configuration.
    pub fn fusion(&self) -> &FusionConfig {
        &self.fusion
    }

    /// Returns the metrics configuration.
    pub fn metrics(&self) -> &MetricsConfig {
        &self.metrics
    }

    /// Returns whether batches run in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestratorConfig::default();
        assert!(config.parallel());
        assert_eq!(config.fusion().levels(), 4);
        assert_eq!(config.metrics(), &MetricsConfig::default());
    }
}
