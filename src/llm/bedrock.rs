//! Bedrock runtime client
//!
//! Invokes hosted models through the `InvokeModel` HTTP API. The request body
//! is model-specific (see [`anthropic`](super::anthropic) and
//! [`stability`](super::stability)); this module only handles transport.
//!
//! # Authentication
//!
//! Uses a Bedrock API key sent as a bearer token.
//!
//! ```ignore
//! // From environment variables
//! let provider = BedrockProvider::from_env()?;
//!
//! // From an explicit config
//! let provider = BedrockProvider::new(ChatConfig::new("bedrock-api-key"));
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::anthropic::{self, ClaudeRequest};
use super::provider::{ChatModel, ImageModel};
use super::stability::{self, StableDiffusionRequest};
use super::types::{ContentBlock, Message};
use crate::config::ChatConfig;
use crate::core::{ChatError, ChatResult};

/// Client for both the chat model and the image model
pub struct BedrockProvider {
    client: Client,
    config: ChatConfig,
}

impl BedrockProvider {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a provider from environment variables (see [`ChatConfig::from_env`])
    pub fn from_env() -> ChatResult<Self> {
        tracing::info!("Creating Bedrock provider from environment");
        Ok(Self::new(ChatConfig::from_env()?))
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// URL of the `InvokeModel` operation for a model
    pub fn invoke_url(&self, model_id: &str) -> String {
        format!(
            "{}/model/{}/invoke",
            self.config.endpoint(),
            model_id.replace(':', "%3A")
        )
    }

    /// POST a JSON body to a model and return the raw response body
    async fn invoke<B: Serialize>(&self, model_id: &str, body: &B) -> ChatResult<String> {
        let url = self.invoke_url(model_id);
        let request_json = serde_json::to_string(body)?;

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(&self.config.api_key)
            .body(request_json)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        tracing::debug!("[Bedrock] Response status: {}", status);

        if !status.is_success() {
            tracing::error!("[Bedrock] API error: {} - {}", status, response_text);
            return Err(ChatError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        Ok(response_text)
    }
}

/// Copy of the messages with image payloads replaced by their size
fn redact_images(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .map(|msg| {
            let content = msg
                .content
                .iter()
                .map(|block| match block {
                    ContentBlock::Image { source } => ContentBlock::image(
                        format!("<{} base64 chars>", source.data.len()),
                        source.media_type.clone(),
                    ),
                    other => other.clone(),
                })
                .collect();
            Message::new(msg.role, content)
        })
        .collect()
}

#[async_trait]
impl ChatModel for BedrockProvider {
    async fn reply(&self, messages: &[Message]) -> ChatResult<String> {
        tracing::info!(
            "[Bedrock] Invoking chat model {} with {} messages",
            self.config.chat_model,
            messages.len()
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            let redacted = redact_images(messages);
            if let Ok(json) = serde_json::to_string(&ClaudeRequest::new(&redacted)) {
                tracing::debug!("[Bedrock] Chat request: {}", json);
            }
        }

        let body = self
            .invoke(&self.config.chat_model, &ClaudeRequest::new(messages))
            .await?;
        tracing::debug!("[Bedrock] Chat response: {}", body);

        anthropic::parse_reply(&body)
    }

    fn model(&self) -> String {
        self.config.chat_model.clone()
    }
}

#[async_trait]
impl ImageModel for BedrockProvider {
    async fn generate(&self, prompt: &str) -> ChatResult<Vec<u8>> {
        tracing::info!(
            "[Bedrock] Invoking image model {} (prompt: {} chars)",
            self.config.image_model,
            prompt.len()
        );

        let body = self
            .invoke(&self.config.image_model, &StableDiffusionRequest::new(prompt))
            .await?;
        tracing::debug!("[Bedrock] Image response: {} bytes", body.len());

        stability::parse_artifact(&body)
    }

    fn model(&self) -> String {
        self.config.image_model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_url_encodes_model_version() {
        let provider = BedrockProvider::new(ChatConfig::new("key"));
        assert_eq!(
            provider.invoke_url("anthropic.claude-3-sonnet-20240229-v1:0"),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/anthropic.claude-3-sonnet-20240229-v1%3A0/invoke"
        );
    }

    #[test]
    fn test_redact_images_keeps_text() {
        let messages = vec![Message::user_input(Some("look"), Some(b"abcdef".as_slice())).unwrap()];
        let redacted = redact_images(&messages);
        assert_eq!(redacted[0].content[0], ContentBlock::text("look"));
        match &redacted[0].content[1] {
            ContentBlock::Image { source } => {
                assert_eq!(source.data, "<8 base64 chars>");
                assert_eq!(source.media_type, "image/png");
            }
            other => panic!("expected image block, got {:?}", other),
        }
    }
}
