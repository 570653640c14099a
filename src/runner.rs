//! Application Runner Module
//!
//! Shared entry point used by the `octochat` binary: resolves settings,
//! sets up file logging and drives the TUI on a single-threaded local set.

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Settings, XdgDirs};

/// Runtime configuration collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Start in dark mode regardless of the settings file
    pub dark: bool,
    /// Settings file to read instead of the XDG default
    pub config_path: Option<PathBuf>,
    /// Log file to write instead of the XDG default
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,octochat=debug"
        }
    }
}

/// Load the settings file and apply command line overrides.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read or parsed.
pub fn resolve_settings(config: &AppConfig, dirs: &XdgDirs) -> anyhow::Result<Settings> {
    let path = config
        .config_path
        .clone()
        .unwrap_or_else(|| dirs.config_file());
    let mut settings = Settings::load_from(&path)?;
    if config.dark {
        settings.dark_mode = true;
    }
    Ok(settings)
}

fn init_logging(config: &AppConfig, dirs: &XdgDirs) -> anyhow::Result<PathBuf> {
    // stdout belongs to the terminal UI, so logs go to a file
    let path = match &config.log_file {
        Some(path) => path.clone(),
        None => {
            dirs.ensure_dirs()
                .context("Failed to create octochat directories")?;
            dirs.log_file()
        }
    };
    let log_file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(path)
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI feature is not enabled, if settings cannot be
/// loaded, or if the terminal fails.
#[cfg(feature = "tui")]
pub fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    let dirs = XdgDirs::new();
    let log_path = init_logging(&config, &dirs)?;
    let settings = resolve_settings(&config, &dirs)?;
    tracing::info!(log = %log_path.display(), ?settings, "starting octochat");

    // Replies are spawned with spawn_local, so everything runs on one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, crate::tui::run(settings))
}

#[cfg(not(feature = "tui"))]
pub fn run_tui(_config: AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("TUI feature not enabled. Recompile with --features tui")
}
