//! Builds the multimodal user turn and sends it with the prior conversation

use std::sync::Arc;

use crate::core::{ChatError, ChatResult};
use crate::llm::{ChatModel, Message};

/// Result of a successful compose call
///
/// `history` is the prior conversation plus the new user message. The
/// assistant reply is not in it; the caller appends it when committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedTurn {
    pub reply: String,
    pub history: Vec<Message>,
}

/// Sends text and/or an image to the chat model with conversation context
pub struct ConversationComposer {
    model: Arc<dyn ChatModel>,
}

impl ConversationComposer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Build the user message for a submission
    ///
    /// Content order is fixed: text block, then image block. Empty text
    /// counts as absent.
    pub fn user_message(text: Option<&str>, image: Option<&[u8]>) -> ChatResult<Message> {
        let text = text.filter(|t| !t.is_empty());
        Message::user_input(text, image).ok_or(ChatError::EmptyInput)
    }

    /// Append a new user turn to `prior` and ask the model for a reply
    ///
    /// `prior` is never modified; on error nothing is returned for the caller
    /// to commit.
    pub async fn compose(
        &self,
        prior: &[Message],
        text: Option<&str>,
        image: Option<&[u8]>,
    ) -> ChatResult<ComposedTurn> {
        let message = Self::user_message(text, image)?;

        let mut history = Vec::with_capacity(prior.len() + 1);
        history.extend_from_slice(prior);
        history.push(message);

        tracing::info!(
            "[Composer] Sending {} messages to {} (image: {})",
            history.len(),
            self.model.model(),
            image.is_some()
        );

        let reply = self.model.reply(&history).await.map_err(|e| {
            tracing::error!("[Composer] Chat model call failed: {}", e);
            e
        })?;

        tracing::debug!("[Composer] Reply: {} chars", reply.len());
        Ok(ComposedTurn { reply, history })
    }
}
