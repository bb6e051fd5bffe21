//! chatmux - a terminal chat client for hosted multimodal models
//!
//! Text and uploaded images go to a multimodal chat model with the running
//! conversation as context. Inputs starting with `generate image` go to a
//! text-to-image model instead.
//!
//! ```ignore
//! let provider = Arc::new(BedrockProvider::from_env()?);
//! let mut session = ChatSession::new(provider.clone(), provider);
//! let outcome = session.submit(&Input::text("hello")).await?;
//! ```

pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod helpers;
pub mod imagegen;
pub mod llm;
pub mod logging;
pub mod session;

pub use config::ChatConfig;
pub use conversation::{ConversationComposer, ConversationHistory};
pub use crate::core::{ChatError, ChatResult};
pub use imagegen::ImagePromptDispatcher;
pub use llm::{BedrockProvider, ChatModel, ContentBlock, ImageModel, Message, Role};
pub use session::{classify, Action, ChatSession, Input, Outcome};
