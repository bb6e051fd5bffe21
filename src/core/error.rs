//! Error types shared across the crate

use thiserror::Error;

/// Result alias used by every library operation
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors raised while handling a submission
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure talking to the model endpoint
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reply parsed but did not have the expected shape
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither text nor image was supplied to the composer
    #[error("nothing to send: both text and image are empty")]
    EmptyInput,

    #[error("image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: u64, max: u64 },
}

impl ChatError {
    /// Build a [`ChatError::MalformedResponse`]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
