//! Running strategies and scoring their results.

use std::time::Instant;

use ndarray::{Array2, Array3};
use rayon::prelude::*;
use tfuse_fusion::{FusionError, FusionStrategy, Image, fuse_with_config};
use tfuse_metrics::QualityScores;
use tfuse_wavelet::WaveletFamily;
use tracing::{debug, info};

use crate::config::OrchestratorConfig;
use crate::error::OrchestratorError;
use crate::report::{FusedResult, MetricReport};

/// Grayscale references shared by every strategy of a run.
struct References {
    a: Array2<f64>,
    b: Array2<f64>,
}

impl References {
    fn new(a: &Image, b: &Image) -> Self {
        Self {
            a: luma_levels(a),
            b: luma_levels(b),
        }
    }
}

/// Luma of `image` rounded to integer 8-bit levels.
fn luma_levels(image: &Image) -> Array2<f64> {
    image.luma_plane().mapv(|v| v.round().clamp(0.0, 255.0))
}

/// Runs `strategy`, or every strategy of the batch for
/// [`FusionStrategy::All`].
///
/// # Errors
///
/// See [`run_all`] and [`run_one`].
pub fn run(
    a: &Image,
    b: &Image,
    strategy: FusionStrategy,
    family: WaveletFamily,
    config: &OrchestratorConfig,
) -> Result<MetricReport, OrchestratorError> {
    match strategy {
        FusionStrategy::All => run_all(a, b, family, config),
        single => run_one(a, b, single, family, config),
    }
}

/// Fuses and scores a single strategy.
///
/// # Errors
///
/// Returns [`OrchestratorError::Fusion`] or [`OrchestratorError::Metrics`]
/// naming `strategy` when fusion or scoring fails.
pub fn run_one(
    a: &Image,
    b: &Image,
    strategy: FusionStrategy,
    family: WaveletFamily,
    config: &OrchestratorConfig,
) -> Result<MetricReport, OrchestratorError> {
    let references = References::new(a, b);
    let result = run_strategy(a, b, &references, strategy, family, config)?;
    Ok(MetricReport::new(family, config.fusion().levels(), vec![result]))
}

/// Fuses and scores every strategy in [`FusionStrategy::BATCH`] order.
///
/// Strategies run on the rayon pool when the configuration allows it;
/// results and lines keep batch order either way.
///
/// # Errors
///
/// Returns the error of the first failing strategy in batch order.
#[tracing::instrument(skip(a, b, config))]
pub fn run_all(
    a: &Image,
    b: &Image,
    family: WaveletFamily,
    config: &OrchestratorConfig,
) -> Result<MetricReport, OrchestratorError> {
    let references = References::new(a, b);
    let run = |strategy: &FusionStrategy| {
        run_strategy(a, b, &references, *strategy, family, config)
    };

    let outcomes: Vec<Result<FusedResult, OrchestratorError>> = if config.parallel() {
        FusionStrategy::BATCH.par_iter().map(run).collect()
    } else {
        FusionStrategy::BATCH.iter().map(run).collect()
    };
    let results = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;

    debug!(strategies = results.len(), "batch complete");
    Ok(MetricReport::new(family, config.fusion().levels(), results))
}

fn run_strategy(
    a: &Image,
    b: &Image,
    references: &References,
    strategy: FusionStrategy,
    family: WaveletFamily,
    config: &OrchestratorConfig,
) -> Result<FusedResult, OrchestratorError> {
    let start = Instant::now();
    let fusion_err = |source: FusionError| OrchestratorError::Fusion { strategy, source };
    let image = fuse_with_config(a, b, strategy, family, config.fusion()).map_err(fusion_err)?;
    let gray = grayscale(&image).map_err(fusion_err)?;
    let elapsed = start.elapsed();

    let scores = QualityScores::compute(
        gray.view(),
        references.a.view(),
        references.b.view(),
        config.metrics(),
    )
    .map_err(|source| OrchestratorError::Metrics { strategy, source })?;

    info!(
        strategy = %strategy,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        ssim = scores.ssim,
        "strategy complete"
    );
    Ok(FusedResult::new(strategy, image, scores, elapsed))
}

fn grayscale(image: &Array3<u8>) -> Result<Array2<f64>, FusionError> {
    Ok(luma_levels(&Image::from_u8(image.clone())?))
}
