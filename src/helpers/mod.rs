//! Filesystem helpers for uploaded and generated images

pub mod attachments;
pub mod images;

pub use attachments::{load_image, sniff_media_type, MAX_IMAGE_SIZE};
pub use images::save_generated_image;
