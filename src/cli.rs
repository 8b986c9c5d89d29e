use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tfuse wavelet-domain image fusion.
#[derive(Parser)]
#[command(
    name = "tfuse",
    version,
    about = "Fuse visible and thermal images in the wavelet domain"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fuse an image pair with one or all strategies and score the results.
    Fuse(FuseArgs),
    /// List the supported wavelet families.
    Wavelets,
}

/// Arguments for the `fuse` subcommand.
#[derive(clap::Args)]
pub struct FuseArgs {
    /// Path to the visible (RGB) image.
    #[arg(long)]
    pub visible: PathBuf,

    /// Path to the thermal image.
    #[arg(long)]
    pub thermal: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fusion strategy: All, Min, Max, Mean, Entropy, MACD, Edge, Deviation.
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Wavelet family name, e.g. db, haar, sym, coif, bior, rbio, dmey.
    #[arg(short, long)]
    pub wavelet: Option<String>,

    /// Number of decomposition levels.
    #[arg(short, long)]
    pub levels: Option<usize>,

    /// Fuse grayscale versions of the inputs.
    #[arg(long)]
    pub gray: bool,

    /// Crop both inputs to their common top-left region.
    #[arg(long)]
    pub crop: bool,

    /// Run the strategies of a batch one after another.
    #[arg(long)]
    pub sequential: bool,

    /// Directory for the fused `<Strategy>.png` images.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Path for the JSON metrics report.
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Do not write fused images.
    #[arg(long)]
    pub no_images: bool,
}
