//! TUI (Terminal User Interface) for Octochat
//!
//! Renders the conversation as chat bubbles, feeds keystrokes into the
//! pending input and toggles between the light and dark palettes.

mod app;
mod event;
mod theme;
mod ui;

pub mod widgets;

pub use app::TuiApp;
pub use theme::Theme;

use anyhow::Result;

use crate::config::Settings;

/// Run the TUI application
///
/// Must be driven inside a [`tokio::task::LocalSet`].
pub async fn run(settings: Settings) -> Result<()> {
    let app = TuiApp::new(&settings);
    app.run(&settings).await
}
