//! Command-line interface definitions using clap

use std::path::PathBuf;

use clap::Parser;

/// Aegis - public IP exposure scan with a security advisory
#[derive(Debug, Parser)]
#[command(name = "aegis")]
#[command(version)]
#[command(about = "Resolve your public IP, geolocate it and get a security advisory", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: <config_dir>/aegis/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the cosmetic delays between scan steps
    #[arg(long)]
    pub no_pacing: bool,

    /// Resolve the IP only, do not request an advisory
    #[arg(long)]
    pub skip_advisory: bool,
}
