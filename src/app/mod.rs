use std::path::PathBuf;
use clap::Parser;

pub mod controller;
pub mod main;
mod prettylog;

pub use controller::AppController;

/// Heart rate bridge: serves a bpm text file to polling overlays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file (default: hrbridge.toml next to the executable)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Heart rate text file, saved to the settings
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Listen host (e.g., localhost or 0.0.0.0), saved to the settings
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port, saved to the settings
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Print the current file value every N seconds (disabled if not specified)
    #[arg(long)]
    pub status_interval: Option<u64>,
}
