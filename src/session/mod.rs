//! Session state and top-level routing of user submissions

mod chat_session;
mod input;

pub use chat_session::{ChatSession, Outcome, IMAGE_ACK};
pub use input::{classify, Action, Input};
