//! Chat message types
//!
//! Defines the immutable message record shown in the conversation.

use super::code_fence::{extract_code, CodeSnippet};

/// Someone who can author a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    /// Display name shown in the message header
    pub name: &'static str,
    /// Avatar key (an image name or initials)
    pub avatar: &'static str,
}

impl Participant {
    /// The person operating the input box.
    pub const LOCAL: Participant = Participant {
        name: "youki",
        avatar: "YK",
    };

    /// The simulated counterpart that answers every message.
    pub const REMOTE: Participant = Participant {
        name: "octocat",
        avatar: "octocat",
    };
}

/// Two-character uppercase label for an avatar key.
///
/// Terminals cannot draw avatar images, so `octocat` becomes `OC` and
/// initials such as `YK` are kept as they are.
pub fn avatar_badge(avatar: &str) -> String {
    let badge: String = avatar
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if badge.is_empty() {
        "??".to_string()
    } else {
        badge
    }
}

/// How a message body should be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBody<'a> {
    /// Render the content as-is
    Plain(&'a str),
    /// Render leading prose followed by a code box
    WithCode(CodeSnippet<'a>),
}

/// A single chat entry.
///
/// Records are built once and never modified; the conversation only hands
/// out shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: String,
    sender: String,
    avatar: String,
    content: String,
    time: String,
    is_sent: bool,
    has_code_block: bool,
}

impl ChatMessage {
    pub fn new(
        author: Participant,
        content: impl Into<String>,
        time: impl Into<String>,
        is_sent: bool,
        has_code_block: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: author.name.to_string(),
            avatar: author.avatar.to_string(),
            content: content.into(),
            time: time.into(),
            is_sent,
            has_code_block,
        }
    }

    /// A message typed by the local user.
    pub fn outgoing(content: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(Participant::LOCAL, content, time, true, false)
    }

    /// A plain message from the remote counterpart.
    pub fn incoming(content: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(Participant::REMOTE, content, time, false, false)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Display timestamp (`HH:mm`), not a sortable instant
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Whether the local user sent this message
    pub fn is_sent(&self) -> bool {
        self.is_sent
    }

    pub fn has_code_block(&self) -> bool {
        self.has_code_block
    }

    /// Split the content for display.
    ///
    /// Extraction only runs for messages flagged as carrying a code block.
    /// Flagged messages whose fences are malformed fall back to plain text.
    pub fn body(&self) -> MessageBody<'_> {
        if !self.has_code_block {
            return MessageBody::Plain(&self.content);
        }
        match extract_code(&self.content) {
            Some(snippet) => MessageBody::WithCode(snippet),
            None => {
                tracing::debug!(id = %self.id, "code block flag set but no fence pair found");
                MessageBody::Plain(&self.content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_message_fields() {
        let msg = ChatMessage::outgoing("hello", "09:41");
        assert_eq!(msg.sender(), "youki");
        assert_eq!(msg.avatar(), "YK");
        assert_eq!(msg.content(), "hello");
        assert_eq!(msg.time(), "09:41");
        assert!(msg.is_sent());
        assert!(!msg.has_code_block());
    }

    #[test]
    fn test_incoming_message_fields() {
        let msg = ChatMessage::incoming("hi", "10:00");
        assert_eq!(msg.sender(), "octocat");
        assert!(!msg.is_sent());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::outgoing("same", "09:41");
        let b = ChatMessage::outgoing("same", "09:41");
        assert_ne!(a.id(), b.id());
        assert!(!a.id().is_empty());
    }

    #[test]
    fn test_body_plain_when_not_flagged() {
        // Fences are ignored unless the flag is set
        let msg = ChatMessage::incoming("a```b```c", "09:41");
        assert_eq!(msg.body(), MessageBody::Plain("a```b```c"));
    }

    #[test]
    fn test_body_with_code_when_flagged() {
        let msg = ChatMessage::new(Participant::REMOTE, "see:```let x = 1;```", "09:41", false, true);
        match msg.body() {
            MessageBody::WithCode(snippet) => {
                assert_eq!(snippet.prose, "see:");
                assert_eq!(snippet.code, "let x = 1;");
            }
            other => panic!("expected code body, got {other:?}"),
        }
    }

    #[test]
    fn test_body_falls_back_on_malformed_fence() {
        let msg = ChatMessage::new(Participant::REMOTE, "half ```open", "09:41", false, true);
        assert_eq!(msg.body(), MessageBody::Plain("half ```open"));
    }

    #[test]
    fn test_avatar_badge() {
        assert_eq!(avatar_badge("YK"), "YK");
        assert_eq!(avatar_badge("octocat"), "OC");
        assert_eq!(avatar_badge("a"), "A");
        assert_eq!(avatar_badge(""), "??");
    }
}
