//! Conversation state and the chat-model side of a submission

mod composer;
mod history;

pub use composer::{ComposedTurn, ConversationComposer};
pub use history::ConversationHistory;
