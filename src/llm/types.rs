//! Conversation types in the Anthropic messages format
//!
//! These serialize directly into the `messages` array of a chat request, so
//! the serde attributes define the wire shape.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Media type of every uploaded image block
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Capitalized label used when rendering history
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// Base64 payload of an image block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub media_type: String,
    pub data: String,
}

/// A single typed unit of message content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Image block from already-encoded base64 data
    pub fn image(data: impl Into<String>, media_type: impl Into<String>) -> Self {
        ContentBlock::Image {
            source: ImageSource {
                source_type: "base64".to_string(),
                media_type: media_type.into(),
                data: data.into(),
            },
        }
    }

    /// Image block from raw PNG bytes
    pub fn png(bytes: &[u8]) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::image(data, PNG_MEDIA_TYPE)
    }

    /// Text of a text block, `None` for images
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Image { .. } => None,
        }
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn new(role: Role, content: Vec<ContentBlock>) -> Self {
        Self { role, content }
    }

    /// A user message with a single text block
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![ContentBlock::text(text)])
    }

    /// An assistant message with a single text block
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![ContentBlock::text(text)])
    }

    /// Build the user turn for a submission: text block first, image second
    ///
    /// Returns `None` when neither part is present.
    pub fn user_input(text: Option<&str>, image: Option<&[u8]>) -> Option<Self> {
        let mut content = Vec::with_capacity(2);
        if let Some(text) = text {
            content.push(ContentBlock::text(text));
        }
        if let Some(bytes) = image {
            content.push(ContentBlock::png(bytes));
        }
        if content.is_empty() {
            None
        } else {
            Some(Self::new(Role::User, content))
        }
    }

    /// Concatenated text blocks, newline separated
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_block_wire_shape() {
        let value = serde_json::to_value(ContentBlock::text("hello")).unwrap();
        assert_eq!(value, json!({"type": "text", "text": "hello"}));
    }

    #[test]
    fn test_image_block_wire_shape() {
        let value = serde_json::to_value(ContentBlock::png(b"\x89PNG")).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "image",
                "source": {"type": "base64", "media_type": "image/png", "data": "iVBORw=="}
            })
        );
    }

    #[test]
    fn test_message_role_serializes_lowercase() {
        let value = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"][0]["text"], "hi");
    }

    #[test]
    fn test_user_input_orders_text_before_image() {
        let msg = Message::user_input(Some("look"), Some(b"img".as_slice())).unwrap();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content.len(), 2);
        assert_eq!(msg.content[0].as_text(), Some("look"));
        assert!(matches!(msg.content[1], ContentBlock::Image { .. }));
    }

    #[test]
    fn test_user_input_presence_flags() {
        let text_only = Message::user_input(Some("hi"), None).unwrap();
        assert_eq!(text_only.content, vec![ContentBlock::text("hi")]);

        let image_only = Message::user_input(None, Some(b"img".as_slice())).unwrap();
        assert_eq!(image_only.content.len(), 1);
        assert!(matches!(image_only.content[0], ContentBlock::Image { .. }));

        assert!(Message::user_input(None, None).is_none());
    }

    #[test]
    fn test_image_bytes_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let block = ContentBlock::png(&bytes);
        let decoded = match block {
            ContentBlock::Image { source } => base64::engine::general_purpose::STANDARD
                .decode(source.data)
                .unwrap(),
            other => panic!("expected image block, got {:?}", other),
        };
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_message_text_skips_images() {
        let msg = Message::user_input(Some("caption"), Some(b"img".as_slice())).unwrap();
        assert_eq!(msg.text(), "caption");
    }
}
