//! Claude messages request body and reply parsing
//!
//! Bedrock takes the Anthropic messages body with an `anthropic_version`
//! field in place of the model name (the model lives in the URL).

use serde::{Deserialize, Serialize};

use super::types::Message;
use crate::core::{ChatError, ChatResult};

/// Protocol version sent with every chat request
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
/// Upper bound on reply length
pub const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
pub struct ClaudeRequest<'a> {
    pub anthropic_version: &'static str,
    pub messages: &'a [Message],
    pub max_tokens: u32,
}

impl<'a> ClaudeRequest<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            messages,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// A content block of a Claude reply
///
/// Only text is read; every other block type collapses into `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// The parts of a Claude reply we read
#[derive(Debug, Deserialize)]
pub struct ClaudeResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<ReplyBlock>>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl ClaudeResponse {
    /// Text of the first content block
    ///
    /// A missing, empty or non-text first block is a malformed reply.
    pub fn into_text(self) -> ChatResult<String> {
        let content = self
            .content
            .ok_or_else(|| ChatError::malformed("reply has no content field"))?;

        match content.into_iter().next() {
            Some(ReplyBlock::Text { text }) => Ok(text),
            Some(ReplyBlock::Other) => Err(ChatError::malformed("first reply block is not text")),
            None => Err(ChatError::malformed("reply content is empty")),
        }
    }
}

/// Parse a raw Claude reply body into its text
pub fn parse_reply(body: &str) -> ChatResult<String> {
    let response: ClaudeResponse = serde_json::from_str(body)?;
    if let Some(ref reason) = response.stop_reason {
        tracing::debug!("[Claude] stop_reason={}", reason);
    }
    response.into_text()
}
