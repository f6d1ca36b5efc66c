use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "unpackr",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract every archive in a directory, then put the originals aside",
    long_about = None
)]
pub struct App {
    /// Directory to scan for archives [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Where extracted content goes [default: ./extracted]
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Process exactly this archive instead of scanning
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Delete originals instead of moving them to the holding directory
    #[arg(short, long)]
    pub remove: bool,

    /// Read settings from this TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show what would be extracted without running any tool
    #[arg(long)]
    pub dry_run: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
