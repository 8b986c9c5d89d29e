//! Fused results, printable metric lines and the JSON report.

use std::time::Duration;

use ndarray::Array3;
use serde::Serialize;
use tfuse_fusion::FusionStrategy;
use tfuse_metrics::QualityScores;
use tfuse_wavelet::WaveletFamily;

use crate::error::OrchestratorError;

/// Separator between the lines of consecutive strategies.
pub const SEPARATOR: &str = "------";

/// One fused image with its scores.
#[derive(Clone, Debug)]
pub struct FusedResult {
    strategy: FusionStrategy,
    image: Array3<u8>,
    scores: QualityScores,
    elapsed: Duration,
}

impl FusedResult {
    pub(crate) fn new(
        strategy: FusionStrategy,
        image: Array3<u8>,
        scores: QualityScores,
        elapsed: Duration,
    ) -> Self {
        Self {
            strategy,
            image,
            scores,
            elapsed,
        }
    }

    /// The strategy that produced this result.
    pub fn strategy(&self) -> FusionStrategy {
        self.strategy
    }

    /// Title of the result, the strategy's display name.
    pub fn title(&self) -> &'static str {
        self.strategy.name()
    }

    /// The fused 8-bit image, `(height, width, channels)`.
    pub fn image(&self) -> &Array3<u8> {
        &self.image
    }

    /// Consumes the result, returning the fused image.
    pub fn into_image(self) -> Array3<u8> {
        self.image
    }

    /// Quality scores of the fused image against both sources.
    pub fn scores(&self) -> &QualityScores {
        &self.scores
    }

    /// Wall-clock time spent fusing.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The five printable metric lines of this result.
    pub fn lines(&self) -> Vec<String> {
        let s = self.strategy.name();
        let scores = &self.scores;
        vec![
            format!(
                "Spatial Frequency of {s} : {:.3}, rsFe : {:.3}",
                scores.spatial_frequency, scores.relative_spatial_error
            ),
            format!("SSIM of {s} : {:.3}", scores.ssim),
            format!("Entropy of {s} : {:.3}", scores.entropy),
            format!("IQI of {s} : {:.3}", scores.iqi),
            format!(
                "Time elapsed for {s} : {:.3}s",
                self.elapsed.as_secs_f64()
            ),
        ]
    }
}

/// Ordered results of a run plus their printable lines.
#[derive(Clone, Debug)]
pub struct MetricReport {
    family: WaveletFamily,
    levels: usize,
    lines: Vec<String>,
    results: Vec<FusedResult>,
}

impl MetricReport {
    /// Assembles a report, separating the lines of consecutive results.
    pub(crate) fn new(family: WaveletFamily, levels: usize, results: Vec<FusedResult>) -> Self {
        let mut lines = Vec::with_capacity(results.len() * 6);
        for (i, result) in results.iter().enumerate() {
            if i > 0 {
                lines.push(SEPARATOR.to_string());
            }
            lines.extend(result.lines());
        }
        Self {
            family,
            levels,
            lines,
            results,
        }
    }

    /// Wavelet family used for every result.
    pub fn family(&self) -> WaveletFamily {
        self.family
    }

    /// Decomposition depth used for every result.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Printable metric lines, in strategy order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Results in strategy order.
    pub fn results(&self) -> &[FusedResult] {
        &self.results
    }

    /// Fused images in strategy order.
    pub fn images(&self) -> impl Iterator<Item = &Array3<u8>> {
        self.results.iter().map(FusedResult::image)
    }

    /// Result titles in strategy order.
    pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.results.iter().map(FusedResult::title)
    }

    /// The metric lines joined by newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Serializable summary without the image data.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            wavelet: self.family.wavelet_name().to_string(),
            levels: self.levels,
            results: self
                .results
                .iter()
                .map(|r| {
                    let (height, width, channels) = r.image.dim();
                    ResultSummary {
                        strategy: r.strategy,
                        shape: [height, width, channels],
                        elapsed_secs: r.elapsed.as_secs_f64(),
                        scores: r.scores,
                    }
                })
                .collect(),
        }
    }
}

/// JSON form of a [`MetricReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Wavelet name, e.g. `db1`.
    pub wavelet: String,
    /// Decomposition depth.
    pub levels: usize,
    /// Per-strategy summaries in batch order.
    pub results: Vec<ResultSummary>,
}

/// JSON form of a [`FusedResult`].
#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary {
    /// Strategy that produced the image.
    pub strategy: FusionStrategy,
    /// `[height, width, channels]` of the fused image.
    pub shape: [usize; 3],
    /// Fusion time in seconds.
    pub elapsed_secs: f64,
    /// Quality scores of the fused image.
    pub scores: QualityScores,
}

/// Serializes the report summary to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`OrchestratorError::Serialization`] if serialization fails.
pub fn to_json(report: &MetricReport) -> Result<String, OrchestratorError> {
    serde_json::to_string_pretty(&report.summary()).map_err(|e| {
        OrchestratorError::Serialization {
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(iqi: f64) -> QualityScores {
        QualityScores {
            spatial_frequency: 12.34567,
            reference_spatial_frequency: 10.0,
            relative_spatial_error: 0.234567,
            ssim: 0.5,
            entropy: 7.25,
            iqi,
        }
    }

    fn result(strategy: FusionStrategy, iqi: f64) -> FusedResult {
        FusedResult::new(
            strategy,
            Array3::zeros((2, 3, 1)),
            scores(iqi),
            Duration::from_millis(1500),
        )
    }

    #[test]
    fn test_result_lines_format() {
        let lines = result(FusionStrategy::Macd, 0.9).lines();
        assert_eq!(
            lines,
            vec![
                "Spatial Frequency of MACD : 12.346, rsFe : 0.235",
                "SSIM of MACD : 0.500",
                "Entropy of MACD : 7.250",
                "IQI of MACD : 0.900",
                "Time elapsed for MACD : 1.500s",
            ]
        );
    }

    #[test]
    fn test_negative_scores_keep_sign() {
        let mut r = result(FusionStrategy::Min, -0.25);
        r.scores.relative_spatial_error = -0.5;
        let lines = r.lines();
        assert_eq!(lines[0], "Spatial Frequency of Min : 12.346, rsFe : -0.500");
        assert_eq!(lines[3], "IQI of Min : -0.250");
    }

    #[test]
    fn test_report_separates_strategies() {
        let report = MetricReport::new(
            WaveletFamily::Haar,
            1,
            vec![
                result(FusionStrategy::Min, 0.5),
                result(FusionStrategy::Max, 0.6),
            ],
        );
        assert_eq!(report.lines().len(), 11);
        assert_eq!(report.lines()[5], SEPARATOR);
        assert_eq!(report.titles().collect::<Vec<_>>(), vec!["Min", "Max"]);
        assert_eq!(report.images().count(), 2);
        assert!(report.text().contains("\n------\n"));
    }

    #[test]
    fn test_single_result_has_no_separator() {
        let report = MetricReport::new(WaveletFamily::Haar, 1, vec![result(FusionStrategy::Mean, 0.5)]);
        assert_eq!(report.lines().len(), 5);
        assert!(report.lines().iter().all(|l| l != SEPARATOR));
    }

    #[test]
    fn test_to_json() {
        let report = MetricReport::new(
            WaveletFamily::Daubechies,
            4,
            vec![result(FusionStrategy::Macd, 0.75)],
        );
        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["wavelet"], "db1");
        assert_eq!(value["levels"], 4);
        assert_eq!(value["results"][0]["strategy"], "MACD");
        assert_eq!(value["results"][0]["shape"][1], 3);
        assert_eq!(value["results"][0]["scores"]["iqi"], 0.75);
        assert_eq!(value["results"][0]["elapsed_secs"], 1.5);
    }
}
