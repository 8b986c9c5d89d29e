use approx::assert_relative_eq;
use ndarray::Array3;
use tfuse_fusion::{FusionConfig, FusionError, FusionStrategy, Image};
use tfuse_metrics::MetricsError;
use tfuse_orchestrator::{OrchestratorConfig, OrchestratorError, SEPARATOR, run, run_all, to_json};
use tfuse_wavelet::WaveletFamily;

fn scene(h: usize, w: usize, c: usize, seed: usize) -> Image {
    let data = Array3::from_shape_fn((h, w, c), |(i, j, k)| {
        let x = (i + seed) as f64 * 0.37 + (j * 2 + k) as f64 * 0.19;
        (128.0 + 100.0 * x.sin() + ((i * 5 + j * 3 + seed) % 11) as f64 * 2.0).clamp(0.0, 255.0)
    });
    Image::new(data).unwrap()
}

fn config(parallel: bool) -> OrchestratorConfig {
    OrchestratorConfig::default()
        .with_fusion(FusionConfig::default().with_levels(2))
        .with_parallel(parallel)
}

#[test]
fn batch_reports_in_fixed_order() {
    let report = run_all(
        &scene(24, 24, 3, 0),
        &scene(24, 24, 3, 4),
        WaveletFamily::Daubechies,
        &config(true),
    )
    .unwrap();

    let titles: Vec<_> = report.titles().collect();
    assert_eq!(
        titles,
        vec!["Min", "Max", "Mean", "Entropy", "MACD", "Edge", "Deviation"]
    );
    let separators = report.lines().iter().filter(|l| *l == SEPARATOR).count();
    assert_eq!(separators, 6);
    assert_eq!(report.lines().len(), 7 * 5 + 6);
    assert!(report.lines()[0].starts_with("Spatial Frequency of Min : "));
    assert!(report.lines()[4].starts_with("Time elapsed for Min : "));
    assert!(report.lines()[6].starts_with("Spatial Frequency of Max : "));
}

#[test]
fn parallel_and_sequential_batches_agree() {
    let a = scene(20, 20, 1, 2);
    let b = scene(20, 20, 1, 9);
    let par = run_all(&a, &b, WaveletFamily::Symlets, &config(true)).unwrap();
    let seq = run_all(&a, &b, WaveletFamily::Symlets, &config(false)).unwrap();
    for (p, s) in par.results().iter().zip(seq.results()) {
        assert_eq!(p.strategy(), s.strategy());
        assert_eq!(p.image(), s.image());
        assert_eq!(p.scores(), s.scores());
    }
}

#[test]
fn scores_are_in_range() {
    let report = run(
        &scene(32, 32, 3, 1),
        &scene(32, 32, 3, 6),
        FusionStrategy::All,
        WaveletFamily::Haar,
        &config(true),
    )
    .unwrap();
    for result in report.results() {
        let scores = result.scores();
        assert!(scores.spatial_frequency >= 0.0, "{}", result.title());
        assert!((-1.0..=1.0).contains(&scores.ssim), "{}", result.title());
        assert!((0.0..=1024f64.log2() + 1e-9).contains(&scores.entropy), "{}", result.title());
        assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&scores.iqi), "{}", result.title());
        assert!(scores.relative_spatial_error.is_finite(), "{}", result.title());
        assert_eq!(result.image().dim(), (32, 32, 3));
    }
}

#[test]
fn identical_inputs_score_high_ssim_under_mean() {
    let a = scene(24, 24, 1, 3);
    let report = run(
        &a,
        &a,
        FusionStrategy::Mean,
        WaveletFamily::Haar,
        &config(false),
    )
    .unwrap();
    let scores = report.results()[0].scores();
    // the stretch to 0..=255 is affine, so the structure is preserved
    assert!(scores.ssim > 0.8, "{}", scores.ssim);
    // references are scored at integer luma levels
    let levels = a.luma_plane().mapv(f64::round);
    assert_relative_eq!(
        scores.reference_spatial_frequency,
        tfuse_metrics::spatial(levels.view()).unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn mismatched_shapes_fail_on_first_strategy() {
    let err = run_all(
        &scene(16, 16, 3, 0),
        &scene(16, 12, 3, 1),
        WaveletFamily::Haar,
        &config(true),
    )
    .unwrap_err();
    match err {
        OrchestratorError::Fusion { strategy, source } => {
            assert_eq!(strategy, FusionStrategy::Min);
            assert!(matches!(source, FusionError::ShapeMismatch { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn flat_inputs_abort_the_batch() {
    let a = Image::new(Array3::from_elem((16, 16, 1), 100.0)).unwrap();
    let b = Image::new(Array3::from_elem((16, 16, 1), 30.0)).unwrap();
    for parallel in [true, false] {
        let err = run_all(&a, &b, WaveletFamily::Daubechies, &config(parallel)).unwrap_err();
        match err {
            OrchestratorError::Metrics { strategy, source } => {
                assert_eq!(strategy, FusionStrategy::Min);
                assert!(matches!(
                    source,
                    MetricsError::DegenerateMetric { metric: "rSFe", .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn report_serializes_every_strategy() {
    let report = run_all(
        &scene(16, 16, 1, 0),
        &scene(16, 16, 1, 5),
        WaveletFamily::Coiflets,
        &config(true),
    )
    .unwrap();
    let json = to_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["wavelet"], "coif1");
    assert_eq!(value["levels"], 2);
    let strategies: Vec<_> = value["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["strategy"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        strategies,
        vec!["Min", "Max", "Mean", "Entropy", "MACD", "Edge", "Deviation"]
    );
}
