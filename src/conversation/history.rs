//! Append-only conversation history

use crate::llm::Message;

/// Ordered messages of one session
///
/// Messages are only ever appended. The whole list is dropped by
/// [`clear`](Self::clear) when the hosting layer resets the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    ///
    /// Messages with no content are ignored and logged.
    pub fn push(&mut self, message: Message) {
        if message.content.is_empty() {
            tracing::warn!("[History] Dropping {:?} message with no content", message.role);
            return;
        }
        self.messages.push(message);
    }

    /// Append several messages in order
    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        for message in messages {
            self.push(message);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl From<Vec<Message>> for ConversationHistory {
    fn from(messages: Vec<Message>) -> Self {
        let mut history = Self::new();
        history.extend(messages);
        history
    }
}
