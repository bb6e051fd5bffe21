pub mod anthropic;
pub mod bedrock;
pub mod provider;
pub mod stability;
pub mod types;

pub use bedrock::BedrockProvider;
pub use provider::{ChatModel, ImageModel};
pub use types::{ContentBlock, ImageSource, Message, Role};
