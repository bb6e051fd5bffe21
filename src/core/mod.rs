pub mod error;

pub use error::{ChatError, ChatResult};
