//! Loading image uploads from disk
//!
//! The terminal surface stages uploads with `/image <path>`. The bytes are
//! passed on as-is; the format is only sniffed for logging.

use std::fs;
use std::path::Path;

use crate::core::{ChatError, ChatResult};

/// Maximum upload size (5MB per Claude docs)
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Guess the media type of image bytes from their magic number
pub fn sniff_media_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Read an image upload
///
/// Files over [`MAX_IMAGE_SIZE`] are rejected before they are read.
pub fn load_image(path: impl AsRef<Path>) -> ChatResult<Vec<u8>> {
    let path = path.as_ref();

    let metadata = fs::metadata(path)?;
    if metadata.len() > MAX_IMAGE_SIZE {
        return Err(ChatError::ImageTooLarge {
            size: metadata.len(),
            max: MAX_IMAGE_SIZE,
        });
    }

    let data = fs::read(path)?;

    match sniff_media_type(&data) {
        Some("image/png") => {}
        Some(other) => tracing::warn!(
            "[Attachments] {} is {}, it will be sent labelled as PNG",
            path.display(),
            other
        ),
        None => tracing::warn!("[Attachments] {} is not a recognized image", path.display()),
    }

    tracing::info!(
        "[Attachments] Read image: {} ({} bytes)",
        path.display(),
        data.len()
    );

    Ok(data)
}
