//! Text-to-image side of a submission

mod dispatcher;

pub use dispatcher::{
    is_image_command, strip_command_prefix, GeneratedImage, ImagePromptDispatcher, COMMAND_PREFIX,
};
