//! User submissions and how they are routed

use crate::imagegen::is_image_command;

/// One submission: optional text and optional uploaded image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    text: Option<String>,
    image: Option<Vec<u8>>,
}

impl Input {
    /// Build an input; blank text counts as no text
    pub fn new(text: Option<String>, image: Option<Vec<u8>>) -> Self {
        Self {
            text: text.filter(|t| !t.trim().is_empty()),
            image,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Some(text.into()), None)
    }

    pub fn image(bytes: Vec<u8>) -> Self {
        Self::new(None, Some(bytes))
    }

    pub fn text_and_image(text: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(Some(text.into()), Some(bytes))
    }

    pub fn text_part(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image_part(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// Give back the uploaded image
    pub fn into_image(self) -> Option<Vec<u8>> {
        self.image
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }
}

/// What a submission should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Send to the chat model with the conversation so far
    Compose {
        text: Option<&'a str>,
        image: Option<&'a [u8]>,
    },
    /// Send to the image model; holds the raw command text
    GenerateImage { command: &'a str },
    Noop,
}

/// Route a submission
///
/// An uploaded image always goes to the chat model, even when the text looks
/// like an image command.
pub fn classify(input: &Input) -> Action<'_> {
    match (input.text_part(), input.image_part()) {
        (Some(text), Some(image)) => Action::Compose {
            text: Some(text),
            image: Some(image),
        },
        (Some(text), None) if is_image_command(text) => Action::GenerateImage { command: text },
        (Some(text), None) => Action::Compose {
            text: Some(text),
            image: None,
        },
        (None, Some(image)) => Action::Compose {
            text: None,
            image: Some(image),
        },
        (None, None) => Action::Noop,
    }
}
