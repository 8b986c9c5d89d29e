use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level tfuse configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TfuseConfig {
    /// Fusion settings.
    #[serde(default)]
    pub fusion: FusionToml,

    /// Quality metric settings.
    #[serde(default)]
    pub metrics: MetricsToml,

    /// Batch execution settings.
    #[serde(default)]
    pub run: RunToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl TfuseConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FusionToml {
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_wavelet")]
    pub wavelet: String,
    #[serde(default = "default_levels")]
    pub levels: usize,
    #[serde(default)]
    pub gray: bool,
    #[serde(default)]
    pub crop_to_common: bool,
}

impl Default for FusionToml {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            wavelet: default_wavelet(),
            levels: default_levels(),
            gray: false,
            crop_to_common: false,
        }
    }
}

fn default_strategy() -> String {
    "All".to_string()
}
fn default_wavelet() -> String {
    "db".to_string()
}
fn default_levels() -> usize {
    4
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsToml {
    #[serde(default = "default_iqi_window")]
    pub iqi_window: usize,
}

impl Default for MetricsToml {
    fn default() -> Self {
        Self {
            iqi_window: default_iqi_window(),
        }
    }
}

fn default_iqi_window() -> usize {
    8
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for RunToml {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_true")]
    pub write_images: bool,
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            write_images: true,
            report: None,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
