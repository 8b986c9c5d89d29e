use ndarray::{Array2, Array3, Zip};
use tfuse_fusion::{
    FusionConfig, FusionError, FusionStrategy, Image, fuse, fuse_coefficients, fuse_with_config,
};
use tfuse_wavelet::{WaveletError, WaveletFamily, decompose};

fn scene(h: usize, w: usize, c: usize, seed: usize) -> Image {
    let data = Array3::from_shape_fn((h, w, c), |(i, j, k)| {
        let x = (i * 3 + seed) as f64 * 0.21 + (j + k * 5) as f64 * 0.13;
        (127.0 + 90.0 * x.sin() + ((i * j + seed) % 7) as f64 * 4.0).clamp(0.0, 255.0)
    });
    Image::new(data).unwrap()
}

fn checkerboard(size: usize, square: usize, lo: f64, hi: f64) -> Array2<f64> {
    Array2::from_shape_fn((size, size), |(i, j)| {
        if (i / square + j / square) % 2 == 0 { lo } else { hi }
    })
}

#[test]
fn shape_mismatch_is_rejected() {
    let a = scene(16, 16, 3, 0);
    let b = scene(16, 12, 3, 1);
    let err = fuse(&a, &b, FusionStrategy::Mean, WaveletFamily::Daubechies).unwrap_err();
    assert!(matches!(
        err,
        FusionError::ShapeMismatch {
            left: (16, 16, 3),
            right: (16, 12, 3)
        }
    ));
}

#[test]
fn all_is_not_a_single_strategy() {
    let a = scene(8, 8, 1, 0);
    let err = fuse(&a, &a, FusionStrategy::All, WaveletFamily::Haar).unwrap_err();
    assert!(matches!(err, FusionError::InvalidStrategy(_)));
}

#[test]
fn zero_levels_surface_wavelet_error() {
    let a = scene(8, 8, 1, 0);
    let config = FusionConfig::default().with_levels(0);
    let err = fuse_with_config(&a, &a, FusionStrategy::Mean, WaveletFamily::Haar, &config)
        .unwrap_err();
    assert!(matches!(
        err,
        FusionError::Wavelet(WaveletError::InvalidLevel(0))
    ));
}

#[test]
fn output_keeps_input_shape_for_every_strategy() {
    let a = scene(21, 19, 3, 2);
    let b = scene(21, 19, 3, 5);
    for strategy in FusionStrategy::BATCH {
        let out = fuse(&a, &b, strategy, WaveletFamily::Coiflets).unwrap();
        assert_eq!(out.dim(), (21, 19, 3), "{strategy}");
    }
}

#[test]
fn output_keeps_input_shape_for_every_family() {
    let a = scene(20, 23, 1, 1);
    let b = scene(20, 23, 1, 4);
    for family in WaveletFamily::ALL {
        let out = fuse(&a, &b, FusionStrategy::Max, family).unwrap();
        assert_eq!(out.dim(), (20, 23, 1), "{family}");
    }
}

#[test]
fn fusion_is_deterministic() {
    let a = scene(16, 16, 3, 3);
    let b = scene(16, 16, 3, 9);
    for strategy in FusionStrategy::BATCH {
        let first = fuse(&a, &b, strategy, WaveletFamily::Symlets).unwrap();
        let second = fuse(&a, &b, strategy, WaveletFamily::Symlets).unwrap();
        assert_eq!(first, second, "{strategy}");
    }
}

#[test]
fn symmetric_strategies_commute() {
    let a = scene(24, 20, 3, 1);
    let b = scene(24, 20, 3, 8);
    for strategy in [
        FusionStrategy::Mean,
        FusionStrategy::Min,
        FusionStrategy::Max,
        FusionStrategy::Entropy,
    ] {
        let ab = fuse(&a, &b, strategy, WaveletFamily::Daubechies).unwrap();
        let ba = fuse(&b, &a, strategy, WaveletFamily::Daubechies).unwrap();
        assert_eq!(ab, ba, "{strategy}");
    }
}

#[test]
fn remaining_strategies_commute_up_to_one_grey_level() {
    let a = scene(24, 20, 1, 1);
    let b = scene(24, 20, 1, 8);
    for strategy in [
        FusionStrategy::Macd,
        FusionStrategy::Edge,
        FusionStrategy::Deviation,
    ] {
        let ab = fuse(&a, &b, strategy, WaveletFamily::Daubechies).unwrap();
        let ba = fuse(&b, &a, strategy, WaveletFamily::Daubechies).unwrap();
        let worst = Zip::from(&ab)
            .and(&ba)
            .fold(0i16, |acc, &x, &y| acc.max((x as i16 - y as i16).abs()));
        assert!(worst <= 1, "{strategy}: {worst}");
    }
}

#[test]
fn all_zero_pair_with_entropy_falls_back_to_mean() {
    let zeros = Image::from_gray(Array2::zeros((16, 16))).unwrap();
    let out = fuse(&zeros, &zeros, FusionStrategy::Entropy, WaveletFamily::Daubechies).unwrap();
    assert!(out.iter().all(|v| *v == 0));
}

#[test]
fn solid_grey_pair_gives_uniform_output() {
    let grey = Image::from_gray_u8(Array2::from_elem((16, 16), 100)).unwrap();
    let config = FusionConfig::default().with_levels(1);
    let out = fuse_with_config(
        &grey,
        &grey,
        FusionStrategy::Mean,
        WaveletFamily::from_name("db").unwrap(),
        &config,
    )
    .unwrap();
    let first = out[[0, 0, 0]];
    assert!(out.iter().all(|v| *v == first));
    assert_eq!(first, 100);
}

#[test]
fn max_dominates_min_on_checkerboard_approximation() {
    let a = checkerboard(32, 4, 50.0, 200.0);
    // horizontal mirror
    let b = a.slice(ndarray::s![.., ..;-1]).to_owned();
    let ca = decompose(a.view().insert_axis(ndarray::Axis(2)), WaveletFamily::Haar, 1).unwrap();
    let cb = decompose(b.view().insert_axis(ndarray::Axis(2)), WaveletFamily::Haar, 1).unwrap();

    let max = fuse_coefficients(&ca, &cb, FusionStrategy::Max).unwrap();
    let min = fuse_coefficients(&ca, &cb, FusionStrategy::Min).unwrap();
    Zip::from(max.approximation())
        .and(min.approximation())
        .for_each(|&hi, &lo| assert!(hi >= lo, "{hi} < {lo}"));
}

#[test]
fn mixed_channel_counts_fuse_as_luma() {
    let rgb = scene(12, 12, 3, 0);
    let gray = scene(12, 12, 1, 6);
    let out = fuse(&rgb, &gray, FusionStrategy::Mean, WaveletFamily::Haar).unwrap();
    assert_eq!(out.dim(), (12, 12, 1));
}

#[test]
fn output_spans_full_range() {
    let a = scene(16, 16, 1, 2);
    let b = scene(16, 16, 1, 7);
    let out = fuse(&a, &b, FusionStrategy::Mean, WaveletFamily::Haar).unwrap();
    assert_eq!(out.iter().copied().min(), Some(0));
    assert_eq!(out.iter().copied().max(), Some(255));
}
