//! Octochat - GitHub-styled mock chat in the terminal
//!
//! Always launches the terminal interface.

use std::path::PathBuf;

use clap::Parser;
use octochat::runner::{run_tui, AppConfig};

/// Octochat - a GitHub-styled chat screen with a simulated counterpart 🐙
#[derive(Parser, Debug)]
#[command(name = "octochat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Settings file (defaults to ~/.config/octochat/config.toml)
    #[arg(short = 'c', long, env = "OCTOCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Write logs here (defaults to ~/.local/state/octochat/octochat.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
            dark: args.dark,
            config_path: args.config,
            log_file: args.log_file,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_tui(AppConfig::from(args))
}
