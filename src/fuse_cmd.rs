//! Fuse command: load the pair, run the strategies, print and write results.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use tfuse_fusion::Image;
use tfuse_orchestrator::{MetricReport, run, to_json};

use crate::cli::FuseArgs;
use crate::config::TfuseConfig;
use crate::convert::{self, FuseSettings};
use crate::image_io;

/// Run the fuse pipeline.
pub fn run_fuse(args: FuseArgs) -> Result<()> {
    let _cmd = info_span!("fuse").entered();
    // 1. Load TOML and merge flags
    let config = TfuseConfig::load(args.config.as_deref())?;
    let settings = convert::resolve(&args, &config)?;

    // 2. Read inputs
    info!(path = %args.visible.display(), "reading visible image");
    let visible = image_io::load(&args.visible, settings.gray)?;
    info!(path = %args.thermal.display(), "reading thermal image");
    let thermal = image_io::load(&args.thermal, settings.gray)?;
    let (visible, thermal) = align(visible, thermal, settings.crop_to_common)?;
    info!(
        height = visible.height(),
        width = visible.width(),
        strategy = %settings.strategy,
        wavelet = settings.family.wavelet_name(),
        "inputs loaded"
    );

    // 3. Fuse and score
    let report = run(
        &visible,
        &thermal,
        settings.strategy,
        settings.family,
        &settings.orchestrator,
    )
    .context("fusion failed")?;
    for line in report.lines() {
        println!("{line}");
    }

    // 4. Write outputs
    write_outputs(&report, &settings)
}

/// Crops both images to their common region when allowed, else requires equal sizes.
fn align(visible: Image, thermal: Image, crop_to_common: bool) -> Result<(Image, Image)> {
    let same = (visible.height(), visible.width()) == (thermal.height(), thermal.width());
    if same {
        return Ok((visible, thermal));
    }
    if !crop_to_common {
        bail!(
            "input sizes differ: visible {}x{}, thermal {}x{} (use --crop to fuse the common region)",
            visible.width(),
            visible.height(),
            thermal.width(),
            thermal.height()
        );
    }
    let height = visible.height().min(thermal.height());
    let width = visible.width().min(thermal.width());
    warn!(height, width, "cropping inputs to common region");
    Ok((visible.crop(height, width), thermal.crop(height, width)))
}

fn write_outputs(report: &MetricReport, settings: &FuseSettings) -> Result<()> {
    if settings.write_images {
        let dir = &settings.output_dir;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        for result in report.results() {
            let path = dir.join(format!("{}.png", result.title()));
            image_io::save_png(&path, result.image())?;
            info!(path = %path.display(), "fused image written");
        }
    }

    if let Some(path) = &settings.report {
        let json = to_json(report)?;
        std::fs::write(path, &json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use std::path::{Path, PathBuf};

    fn write_scene(path: &Path, h: usize, w: usize, seed: usize) {
        let data = Array3::from_shape_fn((h, w, 3), |(i, j, k)| {
            ((i * 11 + j * 7 + k * 3 + seed * 17) % 251) as u8
        });
        image_io::save_png(path, &data).unwrap();
    }

    fn args(dir: &Path, visible: PathBuf, thermal: PathBuf) -> FuseArgs {
        FuseArgs {
            visible,
            thermal,
            config: None,
            strategy: None,
            wavelet: Some("haar".to_string()),
            levels: Some(2),
            gray: false,
            crop: false,
            sequential: false,
            output_dir: Some(dir.join("out")),
            report: Some(dir.join("report.json")),
            no_images: false,
        }
    }

    #[test]
    fn test_fuse_all_writes_every_image_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let visible = dir.path().join("visible.png");
        let thermal = dir.path().join("thermal.png");
        write_scene(&visible, 16, 16, 0);
        write_scene(&thermal, 16, 16, 3);

        run_fuse(args(dir.path(), visible, thermal)).unwrap();

        for title in ["Min", "Max", "Mean", "Entropy", "MACD", "Edge", "Deviation"] {
            assert!(dir.path().join("out").join(format!("{title}.png")).exists(), "{title}");
        }
        let report = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
        assert!(report.contains("\"MACD\""));
        assert!(report.contains("\"haar\""));
    }

    #[test]
    fn test_size_mismatch_needs_crop() {
        let dir = tempfile::tempdir().unwrap();
        let visible = dir.path().join("visible.png");
        let thermal = dir.path().join("thermal.png");
        write_scene(&visible, 16, 20, 0);
        write_scene(&thermal, 16, 16, 3);

        let mut a = args(dir.path(), visible.clone(), thermal.clone());
        a.strategy = Some("Mean".to_string());
        let err = run_fuse(a).unwrap_err();
        assert!(err.to_string().contains("input sizes differ"));

        let mut a = args(dir.path(), visible, thermal);
        a.strategy = Some("Mean".to_string());
        a.crop = true;
        a.report = None;
        run_fuse(a).unwrap();
        let written = image_io::load(&dir.path().join("out").join("Mean.png"), false).unwrap();
        assert_eq!(written.dim(), (16, 16, 3));
    }

    #[test]
    fn test_no_images_skips_png_output() {
        let dir = tempfile::tempdir().unwrap();
        let visible = dir.path().join("visible.png");
        let thermal = dir.path().join("thermal.png");
        write_scene(&visible, 12, 12, 1);
        write_scene(&thermal, 12, 12, 2);

        let mut a = args(dir.path(), visible, thermal);
        a.strategy = Some("Max".to_string());
        a.no_images = true;
        a.gray = true;
        run_fuse(a).unwrap();
        assert!(!dir.path().join("out").exists());
        assert!(dir.path().join("report.json").exists());
    }
}
