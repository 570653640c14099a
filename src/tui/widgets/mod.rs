mod messages;
mod typing;

pub use messages::{MessageList, MessageListState};
pub use typing::TypingIndicator;
