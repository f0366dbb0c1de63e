//! Publication of the verified artifact.

use crate::bundler::{Result, Settings, utils::fs};
use std::path::{Path, PathBuf};

/// Replaces the published APK with the verified signed one.
pub async fn publish(settings: &Settings, signed: &Path) -> Result<PathBuf> {
    let published = settings.published_artifact();
    fs::replace_file(signed, published).await?;
    log::info!("✓ Published {}", published.display());
    Ok(published.to_path_buf())
}
