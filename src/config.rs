//! Runtime configuration
//!
//! Everything is read from environment variables. Request-shape constants
//! (token bound, diffusion settings) live next to the request builders and
//! are deliberately not part of this struct.

use std::env;
use std::path::PathBuf;

use crate::core::{ChatError, ChatResult};

/// Default multimodal chat model
pub const DEFAULT_CHAT_MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";
/// Default text-to-image model
pub const DEFAULT_IMAGE_MODEL: &str = "stability.stable-diffusion-xl-v1";
pub const DEFAULT_REGION: &str = "us-east-1";
/// Directory generated images are written to
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Connection and model settings for a chat session
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Bearer token for the Bedrock runtime endpoint
    pub api_key: String,
    pub region: String,
    /// Explicit endpoint, overrides the region-derived URL
    pub base_url: Option<String>,
    pub chat_model: String,
    pub image_model: String,
    pub output_dir: PathBuf,
}

impl ChatConfig {
    /// Create a config with defaults for everything but the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            region: DEFAULT_REGION.to_string(),
            base_url: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads from:
    /// - `BEDROCK_API_KEY` or `AWS_BEARER_TOKEN_BEDROCK` (required)
    /// - `AWS_REGION` (optional, defaults to us-east-1)
    /// - `BEDROCK_BASE_URL` (optional)
    /// - `CHATMUX_CHAT_MODEL` / `CHATMUX_IMAGE_MODEL` (optional)
    /// - `CHATMUX_OUTPUT_DIR` (optional, defaults to `generated`)
    pub fn from_env() -> ChatResult<Self> {
        let api_key = env::var("BEDROCK_API_KEY")
            .or_else(|_| env::var("AWS_BEARER_TOKEN_BEDROCK"))
            .map_err(|_| {
                ChatError::Config(
                    "BEDROCK_API_KEY or AWS_BEARER_TOKEN_BEDROCK must be set".to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Ok(region) = env::var("AWS_REGION") {
            config.region = region;
        }
        config.base_url = env::var("BEDROCK_BASE_URL").ok();
        if let Ok(model) = env::var("CHATMUX_CHAT_MODEL") {
            config.chat_model = model;
        }
        if let Ok(model) = env::var("CHATMUX_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Ok(dir) = env::var("CHATMUX_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        tracing::info!("Chat model: {}", config.chat_model);
        tracing::info!("Image model: {}", config.image_model);
        tracing::info!("Endpoint: {}", config.endpoint());

        Ok(config)
    }

    /// Set the endpoint override
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// The endpoint requests are sent to, without a trailing slash
    pub fn endpoint(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}
