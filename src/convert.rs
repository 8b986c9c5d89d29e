//! Pure conversion functions: TOML config and CLI flags -> crate API config types.

use std::path::PathBuf;

use anyhow::{Result, bail};

use tfuse_fusion::{FusionConfig, FusionStrategy};
use tfuse_metrics::{IqiConfig, MetricsConfig};
use tfuse_orchestrator::OrchestratorConfig;
use tfuse_wavelet::WaveletFamily;

use crate::cli::FuseArgs;
use crate::config::{MetricsToml, TfuseConfig};

/// Everything the `fuse` command needs after merging flags over the TOML file.
#[derive(Debug)]
pub struct FuseSettings {
    pub strategy: FusionStrategy,
    pub family: WaveletFamily,
    pub gray: bool,
    pub crop_to_common: bool,
    pub output_dir: PathBuf,
    pub write_images: bool,
    pub report: Option<PathBuf>,
    pub orchestrator: OrchestratorConfig,
}

/// Parses a strategy name into the corresponding enum variant.
pub fn parse_strategy(s: &str) -> Result<FusionStrategy> {
    Ok(FusionStrategy::from_name(s)?)
}

/// Parses a wavelet family name into the corresponding enum variant.
pub fn parse_wavelet(s: &str) -> Result<WaveletFamily> {
    Ok(WaveletFamily::from_name(s)?)
}

/// Builds a [`MetricsConfig`] from the TOML metrics configuration.
pub fn build_metrics_config(metrics: &MetricsToml) -> Result<MetricsConfig> {
    if metrics.iqi_window == 0 {
        bail!("iqi_window must be positive");
    }
    Ok(MetricsConfig::default().with_iqi(IqiConfig::default().with_window(metrics.iqi_window)))
}

/// Merges CLI flags over the TOML configuration.
///
/// Flags that are set win; boolean flags can only switch a setting on.
pub fn resolve(args: &FuseArgs, config: &TfuseConfig) -> Result<FuseSettings> {
    let strategy = parse_strategy(args.strategy.as_deref().unwrap_or(&config.fusion.strategy))?;
    let family = parse_wavelet(args.wavelet.as_deref().unwrap_or(&config.fusion.wavelet))?;
    let levels = args.levels.unwrap_or(config.fusion.levels);
    if levels == 0 {
        bail!("levels must be at least 1");
    }

    let orchestrator = OrchestratorConfig::default()
        .with_fusion(FusionConfig::default().with_levels(levels))
        .with_metrics(build_metrics_config(&config.metrics)?)
        .with_parallel(config.run.parallel && !args.sequential);

    Ok(FuseSettings {
        strategy,
        family,
        gray: args.gray || config.fusion.gray,
        crop_to_common: args.crop || config.fusion.crop_to_common,
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.directory.clone()),
        write_images: config.output.write_images && !args.no_images,
        report: args.report.clone().or_else(|| config.output.report.clone()),
        orchestrator,
    })
}
