//! Release build.

use crate::bundler::{Error, Result, Settings, tools::ArtifactBuilder, utils::fs};
use std::path::PathBuf;

/// Cleans stale outputs, runs the release build and checks the unsigned APK exists.
///
/// The output check applies even when the build tool exited successfully.
pub async fn build_release_artifact(
    settings: &Settings,
    builder: &dyn ArtifactBuilder,
) -> Result<PathBuf> {
    for dir in settings.stale_build_dirs() {
        if fs::remove_dir_all(&dir).await? {
            log::debug!("Removed stale build output {}", dir.display());
        }
    }

    // Stale CMake state breaks linking after switching ABIs or NDK versions.
    let cxx = settings.native_build_cache();
    if fs::remove_dir_all(&cxx).await? {
        log::info!("Removed native build cache {}", cxx.display());
    }

    builder.build_release(settings.android_dir()).await?;

    let unsigned = settings.unsigned_artifact();
    if !fs::is_file(&unsigned).await {
        return Err(Error::BuildArtifactMissing { path: unsigned });
    }
    log::info!("✓ Built {}", unsigned.display());
    Ok(unsigned)
}
