//! Chat core for Octochat.
//!
//! Provides:
//! - [`ChatMessage`] records and the [`Participant`]s who write them
//! - [`Conversation`], the in-memory store with change notifications
//! - [`ChatSession`], which sends messages and simulates replies
//! - [`extract_code`] for splitting out an embedded snippet

mod clock;
mod code_fence;
mod conversation;
mod message;
mod seed;
mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use code_fence::{extract_code, CodeSnippet, FENCE};
pub use conversation::{Conversation, ConversationEvent, ThemeMode};
pub use message::{avatar_badge, ChatMessage, MessageBody, Participant};
pub use seed::{seed_messages, SEED_LEN};
pub use session::{ChatSession, SendOutcome, SessionOptions, AUTO_REPLY_TEXT, REPLY_DELAY};
