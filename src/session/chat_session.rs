//! A chat session: history plus the two model front-ends
//!
//! History changes only after a submission's remote call succeeds. A failed
//! submission leaves the session exactly as it was.

use std::sync::Arc;

use super::input::{classify, Action, Input};
use crate::conversation::{ConversationComposer, ConversationHistory};
use crate::core::ChatResult;
use crate::imagegen::{GeneratedImage, ImagePromptDispatcher};
use crate::llm::{ChatModel, ImageModel, Message};

/// Assistant text recorded after an image is generated
pub const IMAGE_ACK: &str = "Generated image based on your prompt.";

/// What a submission produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text reply from the chat model
    Reply(String),
    /// Image from the image model
    Image(GeneratedImage),
    /// Nothing was submitted
    Noop,
}

pub struct ChatSession {
    composer: ConversationComposer,
    dispatcher: ImagePromptDispatcher,
    history: ConversationHistory,
}

impl ChatSession {
    pub fn new(chat_model: Arc<dyn ChatModel>, image_model: Arc<dyn ImageModel>) -> Self {
        Self {
            composer: ConversationComposer::new(chat_model),
            dispatcher: ImagePromptDispatcher::new(image_model),
            history: ConversationHistory::new(),
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Drop all messages
    pub fn reset(&mut self) {
        tracing::info!("[Session] Reset ({} messages dropped)", self.history.len());
        self.history.clear();
    }

    /// Handle one submission and commit its messages on success
    pub async fn submit(&mut self, input: &Input) -> ChatResult<Outcome> {
        match classify(input) {
            Action::Compose { text, image } => {
                let turn = self
                    .composer
                    .compose(self.history.messages(), text, image)
                    .await?;

                let mut committed = ConversationHistory::from(turn.history);
                committed.push(Message::assistant(turn.reply.clone()));
                self.history = committed;

                tracing::info!("[Session] Committed reply, history: {}", self.history.len());
                Ok(Outcome::Reply(turn.reply))
            }
            Action::GenerateImage { command } => {
                let image = self.dispatcher.dispatch(command).await?;

                self.history.push(Message::user(command));
                self.history.push(Message::assistant(IMAGE_ACK));

                tracing::info!("[Session] Committed image, history: {}", self.history.len());
                Ok(Outcome::Image(image))
            }
            Action::Noop => {
                tracing::debug!("[Session] Empty submission ignored");
                Ok(Outcome::Noop)
            }
        }
    }
}
