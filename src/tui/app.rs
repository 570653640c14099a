//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEvent, KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::broadcast::error::RecvError;
use tui_textarea::{CursorMove, Input, TextArea};

use super::event::{AppEvent, ClipboardManager, EventHandler};
use super::theme::Theme;
use super::ui;
use super::widgets::MessageListState;
use crate::chat::{
    ChatSession, Conversation, ConversationEvent, SendOutcome, SessionOptions, SystemClock,
};
use crate::config::Settings;

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: usize = 3;
/// How long copy feedback stays in the title bar
const STATUS_TTL: Duration = Duration::from_secs(2);

/// Owns the terminal and restores it on drop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        // Shift+Enter needs the kitty keyboard protocol; Alt+Enter is the fallback
        let enhanced_keys = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            let _ = execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            );
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            enhanced_keys,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore terminal - reverse order of setup
        if self.enhanced_keys {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Main TUI application
pub struct TuiApp {
    /// Whether the app should quit
    should_quit: bool,
    /// Conversation plus reply simulation
    pub session: ChatSession,
    /// Colors for the current mode
    pub theme: Theme,
    /// Text input area
    pub input: TextArea<'static>,
    /// Message list scroll state
    pub message_list_state: MessageListState,
    /// Clipboard manager
    pub clipboard: ClipboardManager,
    /// Show help overlay
    pub show_help: bool,
    /// Show the typing indicator while replies are pending
    pub typing_indicator: bool,
    /// UI ticks seen so far, drives animations
    pub tick: usize,
    /// Feedback message with its creation time
    pub status: Option<(Instant, String)>,
}

impl TuiApp {
    pub fn new(settings: &Settings) -> Self {
        let conversation = Conversation::seeded().with_mode(settings.mode());
        let session = ChatSession::new(
            conversation,
            SessionOptions {
                reply_delay: settings.reply_delay(),
                clock: Rc::new(SystemClock),
            },
        );
        let theme = Theme::resolve(settings.mode());

        Self {
            should_quit: false,
            input: build_input(&theme),
            session,
            theme,
            message_list_state: MessageListState::default(),
            clipboard: ClipboardManager::new(),
            show_help: false,
            typing_indicator: settings.typing_indicator,
            tick: 0,
            status: None,
        }
    }

    /// Run the event loop until the user quits.
    pub async fn run(mut self, settings: &Settings) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let mut events = EventHandler::new(settings.tick_rate());
        let mut updates = self.session.subscribe();

        tracing::info!(
            mode = ?self.session.conversation().mode(),
            delay_ms = self.session.reply_delay().as_millis() as u64,
            "chat screen started"
        );

        while !self.should_quit {
            guard.terminal.draw(|frame| ui::render(frame, &mut self))?;

            tokio::select! {
                biased;
                update = updates.recv() => self.handle_update(update),
                maybe_event = events.next() => match maybe_event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
            }
        }

        self.session.shutdown();
        tracing::info!("chat screen closed");
        Ok(())
    }

    /// React to a conversation change.
    fn handle_update(&mut self, update: Result<ConversationEvent, RecvError>) {
        match update {
            Ok(ConversationEvent::MessageAppended { .. }) => {
                self.message_list_state.scroll_to_bottom();
            }
            Ok(ConversationEvent::ModeToggled(mode)) => {
                self.apply_theme(Theme::resolve(mode));
            }
            Ok(ConversationEvent::InputChanged) => {}
            Err(RecvError::Lagged(missed)) => {
                tracing::debug!(missed, "conversation updates lagged, resyncing");
                let mode = self.session.conversation().mode();
                self.apply_theme(Theme::resolve(mode));
                self.message_list_state.scroll_to_bottom();
            }
            Err(RecvError::Closed) => self.should_quit = true,
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Scroll(direction) => {
                if direction < 0 {
                    self.message_list_state.scroll_up(WHEEL_LINES);
                } else {
                    self.message_list_state.scroll_down(WHEEL_LINES);
                }
            }
            AppEvent::Paste(text) => {
                self.input.insert_str(text);
                self.sync_input();
            }
            AppEvent::Tick => {
                self.tick = self.tick.wrapping_add(1);
                if self
                    .status
                    .as_ref()
                    .is_some_and(|(at, _)| at.elapsed() >= STATUS_TTL)
                {
                    self.status = None;
                }
            }
            // Next draw picks up the new size
            AppEvent::Resize(..) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q' | 'c')) => {
                self.should_quit = true;
            }
            (_, KeyCode::Esc) => {
                self.show_help = false;
            }
            // F1 toggles help (don't use '?' - that should just type a question mark)
            (_, KeyCode::F(1)) => {
                self.show_help = !self.show_help;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                self.session.toggle_mode();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => self.copy_latest_snippet(),
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
                if let Some(text) = self.clipboard.paste() {
                    self.input.insert_str(text);
                    self.sync_input();
                }
            }
            (KeyModifiers::NONE, KeyCode::Enter) => self.send_message(),
            (KeyModifiers::SHIFT, KeyCode::Enter) | (KeyModifiers::ALT, KeyCode::Enter) => {
                self.input.insert_newline();
                self.sync_input();
            }
            (_, KeyCode::PageUp) => {
                let page = self.message_list_state.viewport_height.max(1);
                self.message_list_state.scroll_up(page);
            }
            (_, KeyCode::PageDown) => {
                let page = self.message_list_state.viewport_height.max(1);
                self.message_list_state.scroll_down(page);
            }
            // Arrow keys scroll while the input is a single line
            (KeyModifiers::NONE, KeyCode::Up) if self.input.lines().len() == 1 => {
                self.message_list_state.scroll_up(1);
            }
            (KeyModifiers::NONE, KeyCode::Down) if self.input.lines().len() == 1 => {
                self.message_list_state.scroll_down(1);
            }
            _ => {
                if self.input.input(Input::from(key)) {
                    self.sync_input();
                }
            }
        }
    }

    /// Mirror the text area into the conversation's pending input.
    fn sync_input(&mut self) {
        self.session.set_input(self.input.lines().join("\n"));
    }

    fn send_message(&mut self) {
        match self.session.send() {
            SendOutcome::Sent { .. } => {
                self.input = build_input(&self.theme);
            }
            SendOutcome::EmptyInput => {}
        }
    }

    fn copy_latest_snippet(&mut self) {
        let snippet = self
            .session
            .conversation()
            .latest_code_snippet()
            .map(|s| s.body().to_string());
        let feedback = match snippet {
            Some(code) if self.clipboard.copy(&code) => "Code copied!",
            Some(_) => "Clipboard unavailable",
            None => "No code to copy",
        };
        self.status = Some((Instant::now(), feedback.to_string()));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        style_input(&mut self.input, &theme);
    }
}

fn build_input(theme: &Theme) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(Style::default());
    input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    input.set_placeholder_text("输入消息...");
    style_input(&mut input, theme);
    input.move_cursor(CursorMove::End);
    input
}

fn style_input(input: &mut TextArea<'static>, theme: &Theme) {
    input.set_placeholder_style(Style::default().fg(theme.secondary_text));
    input.set_style(Style::default().fg(theme.text).bg(theme.input_background));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ThemeMode, SEED_LEN};
    use tokio::task::LocalSet;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, modifiers))
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_syncs_pending_input() {
        LocalSet::new()
            .run_until(async {
                let mut app = TuiApp::new(&Settings::default());
                type_text(&mut app, "hey");
                assert_eq!(app.session.conversation().input(), "hey");

                app.handle_event(key(KeyCode::Enter, KeyModifiers::ALT));
                type_text(&mut app, "you");
                assert_eq!(app.session.conversation().input(), "hey\nyou");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_sends_and_resets_input() {
        LocalSet::new()
            .run_until(async {
                let mut app = TuiApp::new(&Settings::default());
                type_text(&mut app, "hello");
                app.handle_event(key(KeyCode::Enter, KeyModifiers::NONE));

                assert_eq!(app.session.conversation().len(), SEED_LEN + 1);
                assert_eq!(app.input.lines(), [""]);
                assert_eq!(app.session.pending_replies(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_on_blank_input_keeps_text() {
        LocalSet::new()
            .run_until(async {
                let mut app = TuiApp::new(&Settings::default());
                type_text(&mut app, "   ");
                app.handle_event(key(KeyCode::Enter, KeyModifiers::NONE));

                assert_eq!(app.session.conversation().len(), SEED_LEN);
                assert_eq!(app.input.lines(), ["   "]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_t_toggles_theme() {
        LocalSet::new()
            .run_until(async {
                let mut app = TuiApp::new(&Settings::default());
                let mut updates = app.session.subscribe();

                app.handle_event(key(KeyCode::Char('t'), KeyModifiers::CONTROL));
                app.handle_update(updates.recv().await);

                assert_eq!(app.session.conversation().mode(), ThemeMode::Dark);
                assert_eq!(app.theme, Theme::dark());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_append_resumes_following() {
        LocalSet::new()
            .run_until(async {
                let mut app = TuiApp::new(&Settings::default());
                app.message_list_state.scroll_up(5);
                assert!(!app.message_list_state.is_following());

                app.handle_update(Ok(ConversationEvent::MessageAppended {
                    id: "x".to_string(),
                    index: SEED_LEN,
                }));
                assert!(app.message_list_state.is_following());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_keys() {
        LocalSet::new()
            .run_until(async {
                let mut app = TuiApp::new(&Settings::default());
                app.handle_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL));
                assert!(app.should_quit);
            })
            .await;
    }
}
