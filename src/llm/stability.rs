//! Stable Diffusion request body and artifact decoding

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::{ChatError, ChatResult};

/// Classifier-free guidance scale
pub const CFG_SCALE: u32 = 10;
pub const SEED: u32 = 0;
/// Diffusion step count
pub const STEPS: u32 = 50;

#[derive(Debug, Serialize)]
pub struct TextPrompt<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct StableDiffusionRequest<'a> {
    pub text_prompts: Vec<TextPrompt<'a>>,
    pub cfg_scale: u32,
    pub seed: u32,
    pub steps: u32,
}

impl<'a> StableDiffusionRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            text_prompts: vec![TextPrompt { text: prompt }],
            cfg_scale: CFG_SCALE,
            seed: SEED,
            steps: STEPS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct StableDiffusionResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl StableDiffusionResponse {
    /// Decoded bytes of the first artifact
    pub fn into_image(self) -> ChatResult<Vec<u8>> {
        let artifact = self
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::malformed("response has no artifacts"))?;

        if let Some(reason) = artifact.finish_reason.as_deref() {
            if reason != "SUCCESS" {
                return Err(ChatError::malformed(format!(
                    "image generation finished with {}",
                    reason
                )));
            }
        }

        let data = artifact
            .base64
            .ok_or_else(|| ChatError::malformed("artifact has no base64 field"))?;

        Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
    }
}

/// Parse a raw image-generation reply body into image bytes
pub fn parse_artifact(body: &str) -> ChatResult<Vec<u8>> {
    let response: StableDiffusionResponse = serde_json::from_str(body)?;
    if let Some(ref result) = response.result {
        tracing::debug!("[StableDiffusion] result={}", result);
    }
    response.into_image()
}
