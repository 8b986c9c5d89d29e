use approx::assert_relative_eq;
use ndarray::{Array2, Array3, Axis};
use tfuse_metrics::{
    IqiConfig, MetricsConfig, QualityScores, entropy, iqi, spatial, ssim,
};

fn pseudo_random(h: usize, w: usize, seed: u64) -> Array2<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    Array2::from_shape_simple_fn((h, w), || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 256) as f64
    })
}

#[test]
fn metrics_stay_in_range_for_unrelated_images() {
    for seed in 0..5 {
        let a = pseudo_random(24, 20, seed);
        let b = pseudo_random(24, 20, seed + 100);

        let q = iqi(a.view(), b.view(), &IqiConfig::default()).unwrap();
        assert!((-1.0..=1.0).contains(&q), "iqi = {q}");

        let s = ssim(
            a.view().insert_axis(Axis(2)),
            b.view().insert_axis(Axis(2)),
            false,
        )
        .unwrap();
        assert!((-1.0..=1.0).contains(&s), "ssim = {s}");

        assert!(entropy(a.view()) >= 0.0);
        assert!(spatial(a.view()).unwrap() >= 0.0);
    }
}

#[test]
fn entropy_bounded_by_sample_count() {
    let a = pseudo_random(16, 16, 7);
    let positive = a.iter().filter(|v| **v > 0.0).count() as f64;
    assert!(entropy(a.view()) <= positive.log2() + 1e-12);
}

#[test]
fn scores_are_deterministic() {
    let a = pseudo_random(18, 18, 1);
    let b = pseudo_random(18, 18, 2);
    let fused = (&a + &b) / 2.0;
    let config = MetricsConfig::default();
    let first = QualityScores::compute(fused.view(), a.view(), b.view(), &config).unwrap();
    let second = QualityScores::compute(fused.view(), a.view(), b.view(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn ssim_multichannel_of_identical_rgb_is_one() {
    let x = Array3::from_shape_fn((12, 14, 3), |(i, j, c)| ((i * 5 + j * 9 + c * 31) % 200) as f64);
    let s = ssim(x.view(), x.view(), true).unwrap();
    assert_relative_eq!(s, 1.0, epsilon = 1e-6);
}
