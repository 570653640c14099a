//! Conversation state management
//!
//! Owns the message list, the pending input text and the display mode.
//! Every mutation is announced on a broadcast channel so the renderer can
//! redraw and follow the newest message.

use tokio::sync::broadcast;

use super::code_fence::CodeSnippet;
use super::message::{ChatMessage, MessageBody};
use super::seed::seed_messages;

/// Light or dark display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Change notifications emitted by [`Conversation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    /// A record was appended at `index`
    MessageAppended { id: String, index: usize },
    /// The pending input text was replaced
    InputChanged,
    /// The display mode flipped
    ModeToggled(ThemeMode),
}

const EVENT_CAPACITY: usize = 64;

/// A conversation (list of messages plus transient input state)
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    input: String,
    mode: ThemeMode,
    events: broadcast::Sender<ConversationEvent>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Empty conversation in light mode.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            messages: Vec::new(),
            input: String::new(),
            mode: ThemeMode::Light,
            events,
        }
    }

    /// Conversation pre-filled with the seed messages.
    pub fn seeded() -> Self {
        let mut conv = Self::new();
        conv.messages = seed_messages();
        conv
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Receive change notifications from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    /// Add a record to the end of the conversation.
    pub fn append(&mut self, message: ChatMessage) {
        let index = self.messages.len();
        let id = message.id().to_string();
        tracing::trace!(%id, index, sent = message.is_sent(), "append message");
        self.messages.push(message);
        self.notify(ConversationEvent::MessageAppended { id, index });
    }

    /// Replace the pending input text. No validation happens here.
    pub fn set_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.input {
            return;
        }
        self.input = text;
        self.notify(ConversationEvent::InputChanged);
    }

    /// Flip between light and dark mode.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = ?self.mode, "display mode toggled");
        self.notify(ConversationEvent::ModeToggled(self.mode));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Most recent code snippet that can actually be extracted.
    pub fn latest_code_snippet(&self) -> Option<CodeSnippet<'_>> {
        self.messages.iter().rev().find_map(|msg| match msg.body() {
            MessageBody::WithCode(snippet) => Some(snippet),
            MessageBody::Plain(_) => None,
        })
    }

    fn notify(&self, event: ConversationEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::seed::SEED_LEN;

    #[test]
    fn test_new_is_empty_light() {
        let conv = Conversation::new();
        assert!(conv.is_empty());
        assert_eq!(conv.input(), "");
        assert_eq!(conv.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_seeded_has_six_messages() {
        let conv = Conversation::seeded();
        assert_eq!(conv.len(), SEED_LEN);
        assert!(conv.last().unwrap().has_code_block());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut conv = Conversation::new();
        conv.append(ChatMessage::outgoing("first", "09:00"));
        conv.append(ChatMessage::incoming("second", "09:01"));

        let contents: Vec<&str> = conv.messages().iter().map(ChatMessage::content).collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[test]
    fn test_append_notifies() {
        let mut conv = Conversation::seeded();
        let mut rx = conv.subscribe();

        let msg = ChatMessage::outgoing("hello", "09:00");
        let id = msg.id().to_string();
        conv.append(msg);

        assert_eq!(
            rx.try_recv().unwrap(),
            ConversationEvent::MessageAppended { id, index: SEED_LEN }
        );
    }

    #[test]
    fn test_set_input_replaces_text() {
        let mut conv = Conversation::new();
        let mut rx = conv.subscribe();

        conv.set_input("   ");
        assert_eq!(conv.input(), "   ");
        conv.set_input("draft");
        assert_eq!(conv.input(), "draft");

        assert_eq!(rx.try_recv().unwrap(), ConversationEvent::InputChanged);
        assert_eq!(rx.try_recv().unwrap(), ConversationEvent::InputChanged);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_set_input_same_text_is_silent() {
        let mut conv = Conversation::new();
        conv.set_input("x");
        let mut rx = conv.subscribe();
        conv.set_input("x");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_toggle_mode_twice_restores() {
        let mut conv = Conversation::seeded();
        let before: Vec<String> = conv.messages().iter().map(|m| m.id().to_string()).collect();

        conv.toggle_mode();
        assert_eq!(conv.mode(), ThemeMode::Dark);
        conv.toggle_mode();
        assert_eq!(conv.mode(), ThemeMode::Light);

        let after: Vec<String> = conv.messages().iter().map(|m| m.id().to_string()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_mode_notifies() {
        let mut conv = Conversation::new().with_mode(ThemeMode::Dark);
        let mut rx = conv.subscribe();
        conv.toggle_mode();
        assert_eq!(
            rx.try_recv().unwrap(),
            ConversationEvent::ModeToggled(ThemeMode::Light)
        );
    }

    #[test]
    fn test_latest_code_snippet() {
        let mut conv = Conversation::seeded();
        assert_eq!(conv.latest_code_snippet().unwrap().language(), Some("swift"));

        conv.append(ChatMessage::outgoing("plain ```not flagged```", "09:00"));
        assert_eq!(conv.latest_code_snippet().unwrap().language(), Some("swift"));

        assert!(Conversation::new().latest_code_snippet().is_none());
    }

    #[test]
    fn test_theme_mode_helpers() {
        assert_eq!(ThemeMode::from_dark(true), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_dark(false), ThemeMode::Light);
        assert!(ThemeMode::Dark.is_dark());
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
