mod cli;
mod config;
mod convert;
mod fuse_cmd;
mod image_io;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;
use tfuse_wavelet::WaveletFamily;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Fuse(args) => fuse_cmd::run_fuse(args),
        Command::Wavelets => {
            for family in WaveletFamily::ALL {
                println!(
                    "{:<6} {:<8} {}",
                    family.short_name(),
                    family.wavelet_name(),
                    family.long_name()
                );
            }
            Ok(())
        }
    }
}
