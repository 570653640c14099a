//! Event handling for keyboard, mouse, and terminal events

use std::time::Duration;

use arboard::Clipboard;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Mouse wheel (negative = up)
    Scroll(i16),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for animations
    Tick,
    /// Bracketed paste
    Paste(String),
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, so it gets its own thread
        std::thread::spawn(move || loop {
            let next = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(event) => translate(event),
                    Err(err) => {
                        tracing::warn!("Failed to read terminal event: {}", err);
                        None
                    }
                },
                Ok(false) => Some(AppEvent::Tick),
                Err(err) => {
                    tracing::error!("Terminal event polling failed: {}", err);
                    break;
                }
            };
            if let Some(app_event) = next {
                if tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Ignore key releases reported by enhanced keyboards
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(AppEvent::Key(key)),
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::ScrollUp => Some(AppEvent::Scroll(-1)),
            MouseEventKind::ScrollDown => Some(AppEvent::Scroll(1)),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        _ => None,
    }
}

/// Clipboard manager for copy/paste operations
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self {
            clipboard: Clipboard::new().ok(),
        }
    }

    /// Copy text to clipboard
    pub fn copy(&mut self, text: &str) -> bool {
        if let Some(ref mut clipboard) = self.clipboard {
            clipboard.set_text(text).is_ok()
        } else {
            false
        }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
