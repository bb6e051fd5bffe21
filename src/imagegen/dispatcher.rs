//! Turns a `generate image ...` command into an image-model request

use std::sync::Arc;

use crate::core::ChatResult;
use crate::llm::ImageModel;

/// Command that routes a text input to the image model
pub const COMMAND_PREFIX: &str = "generate image";

/// Returns the part of `input` after the command prefix, if it has one
///
/// Matching is case-insensitive and anchored at the first byte, so
/// `"  generate image x"` is not a command.
fn after_prefix(input: &str) -> Option<&str> {
    let head = input.get(..COMMAND_PREFIX.len())?;
    if head.eq_ignore_ascii_case(COMMAND_PREFIX) {
        Some(&input[COMMAND_PREFIX.len()..])
    } else {
        None
    }
}

/// Whether a text input asks for image generation
pub fn is_image_command(input: &str) -> bool {
    after_prefix(input).is_some()
}

/// Derive the image prompt from raw input
///
/// Strips the command prefix when present and trims surrounding whitespace.
pub fn strip_command_prefix(input: &str) -> &str {
    after_prefix(input).unwrap_or(input).trim()
}

/// A generated image and the prompt it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub prompt: String,
    pub bytes: Vec<u8>,
}

/// Sends prompts to the image model
pub struct ImagePromptDispatcher {
    model: Arc<dyn ImageModel>,
}

impl ImagePromptDispatcher {
    pub fn new(model: Arc<dyn ImageModel>) -> Self {
        Self { model }
    }

    /// Generate an image for a raw `generate image ...` input
    pub async fn dispatch(&self, input: &str) -> ChatResult<GeneratedImage> {
        let prompt = strip_command_prefix(input);
        if prompt.is_empty() {
            tracing::warn!("[ImageGen] Empty prompt sent to {}", self.model.model());
        }

        tracing::info!("[ImageGen] Generating image with {}: {}", self.model.model(), prompt);

        let bytes = self.model.generate(prompt).await.map_err(|e| {
            tracing::error!("[ImageGen] Image model call failed: {}", e);
            e
        })?;

        tracing::info!("[ImageGen] Received {} bytes", bytes.len());
        Ok(GeneratedImage {
            prompt: prompt.to_string(),
            bytes,
        })
    }
}
