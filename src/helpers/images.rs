//! Writing generated images to disk

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::core::ChatResult;

/// Save image bytes as `<timestamp>-<short uuid>.png` under `dir`
///
/// Creates the directory if needed and returns the written path.
pub fn save_generated_image(dir: impl AsRef<Path>, bytes: &[u8]) -> ChatResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let id = Uuid::new_v4().simple().to_string();
    let name = format!("{}-{}.png", Utc::now().format("%Y%m%d-%H%M%S"), &id[..8]);
    let path = dir.join(name);

    fs::write(&path, bytes)?;
    tracing::info!("[Images] Saved {} bytes to {}", bytes.len(), path.display());

    Ok(path)
}
