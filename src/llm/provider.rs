//! The two narrow interfaces the rest of the crate talks to
//!
//! [`BedrockProvider`](super::BedrockProvider) implements both; tests swap in
//! in-memory stubs.

use async_trait::async_trait;

use super::types::Message;
use crate::core::ChatResult;

/// A multimodal chat model: conversation in, single text reply out
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the full conversation and return the reply text
    async fn reply(&self, messages: &[Message]) -> ChatResult<String>;

    /// Model identifier, for logging
    fn model(&self) -> String;
}

/// A text-to-image model: prompt in, raw image bytes out
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate an image and return its decoded bytes
    async fn generate(&self, prompt: &str) -> ChatResult<Vec<u8>>;

    fn model(&self) -> String;
}
