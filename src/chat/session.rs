//! Send/reply controller
//!
//! [`ChatSession`] owns the conversation for the lifetime of one screen.
//! Sending appends the local user's message right away and schedules one
//! canned reply from the counterpart after a fixed delay. Replies run as
//! local tasks on the UI thread, so appends are totally ordered by the
//! event loop. Dropping the session cancels every reply still waiting.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::clock::{Clock, SystemClock};
use super::conversation::{Conversation, ConversationEvent, ThemeMode};
use super::message::ChatMessage;

/// Delay between a send and the counterpart's reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Text of every simulated reply.
pub const AUTO_REPLY_TEXT: &str = "收到你的消息了！这是自动回复。";

/// Result of [`ChatSession::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was appended and a reply scheduled
    Sent { id: String },
    /// The input was empty after trimming; nothing happened
    EmptyInput,
}

/// Tunables for a [`ChatSession`].
#[derive(Clone)]
pub struct SessionOptions {
    pub reply_delay: Duration,
    pub clock: Rc<dyn Clock>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            reply_delay: REPLY_DELAY,
            clock: Rc::new(SystemClock),
        }
    }
}

/// Owns the conversation and simulates the counterpart.
pub struct ChatSession {
    conversation: Rc<RefCell<Conversation>>,
    clock: Rc<dyn Clock>,
    reply_delay: Duration,
    shutdown: RefCell<CancellationToken>,
    pending: Rc<Cell<usize>>,
}

impl ChatSession {
    pub fn new(conversation: Conversation, options: SessionOptions) -> Self {
        Self {
            conversation: Rc::new(RefCell::new(conversation)),
            clock: options.clock,
            reply_delay: options.reply_delay,
            shutdown: RefCell::new(CancellationToken::new()),
            pending: Rc::new(Cell::new(0)),
        }
    }

    /// Read-only snapshot of the conversation.
    ///
    /// Do not hold the guard across an `.await`; replies need to borrow the
    /// conversation mutably when they fire.
    pub fn conversation(&self) -> Ref<'_, Conversation> {
        self.conversation.borrow()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.conversation.borrow().subscribe()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.conversation.borrow_mut().set_input(text);
    }

    pub fn toggle_mode(&self) -> ThemeMode {
        let mut conv = self.conversation.borrow_mut();
        conv.toggle_mode();
        conv.mode()
    }

    /// Replies scheduled but not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.pending.get()
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Send the pending input.
    ///
    /// Whitespace-only input is rejected without touching the conversation.
    /// The stored text is sent untrimmed; only the emptiness check trims.
    ///
    /// # Panics
    ///
    /// Must be called from within a [`tokio::task::LocalSet`], since the
    /// reply is spawned with [`tokio::task::spawn_local`].
    pub fn send(&self) -> SendOutcome {
        let mut conv = self.conversation.borrow_mut();
        if conv.input().trim().is_empty() {
            tracing::debug!("ignoring send of empty input");
            return SendOutcome::EmptyInput;
        }

        let message = ChatMessage::outgoing(conv.input(), self.clock.now_hhmm());
        let id = message.id().to_string();
        conv.append(message);
        conv.set_input("");
        drop(conv);

        tracing::debug!(%id, "message sent");
        self.schedule_reply();
        SendOutcome::Sent { id }
    }

    /// Cancel all pending replies.
    ///
    /// Later sends schedule their replies under a fresh token, so they are
    /// answered as usual.
    pub fn shutdown(&self) {
        let previous = self.shutdown.replace(CancellationToken::new());
        previous.cancel();
    }

    fn schedule_reply(&self) {
        let store: Weak<RefCell<Conversation>> = Rc::downgrade(&self.conversation);
        let clock = Rc::clone(&self.clock);
        let pending = Rc::clone(&self.pending);
        let cancel = self.shutdown.borrow().child_token();
        // Measured from the send, not from the task's first poll
        let deadline = tokio::time::Instant::now() + self.reply_delay;

        pending.set(pending.get() + 1);
        tokio::task::spawn_local(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!("pending reply cancelled");
                }
                () = tokio::time::sleep_until(deadline) => deliver_reply(&store, clock.as_ref()),
            }
            pending.set(pending.get().saturating_sub(1));
        });
    }
}

fn deliver_reply(store: &Weak<RefCell<Conversation>>, clock: &dyn Clock) {
    let Some(store) = store.upgrade() else {
        tracing::debug!("conversation gone, dropping reply");
        return;
    };
    let reply = ChatMessage::incoming(AUTO_REPLY_TEXT, clock.now_hhmm());
    tracing::debug!(id = %reply.id(), "auto reply delivered");
    store.borrow_mut().append(reply);
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.shutdown.get_mut().cancel();
    }
}
