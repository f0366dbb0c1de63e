//! File system utilities for the release pipeline.
//!
//! Idempotent removals and a replace-style move used by publication.

use crate::bundler::error::{ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Removes the directory and its contents if it exists.
///
/// Returns whether anything was removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
///
/// Returns whether anything was removed.
pub async fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Whether `path` is an existing regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// Moves `from` to `to`, replacing whatever was at `to`.
///
/// The old file is deleted first, then `from` is renamed into place. When
/// rename fails (e.g. across filesystems) the file is copied to a
/// `.partial` sibling of `to` and that sibling is renamed, so `to` never
/// holds a partially written file.
pub async fn replace_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }

    if remove_file(to).await? {
        log::debug!("Removed previous artifact: {}", to.display());
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!(
                "rename {} -> {} failed ({}), copying instead",
                from.display(),
                to.display(),
                e
            );
            let staging = partial_path(to);
            fs::copy(from, &staging)
                .await
                .fs_context("copying artifact to staging file", &staging)?;
            fs::rename(&staging, to)
                .await
                .fs_context("moving staged artifact into place", to)?;
            remove_file(from).await?;
            Ok(())
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removals_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("build/outputs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("stale.apk"), b"old").unwrap();

        assert!(remove_dir_all(&nested).await.unwrap());
        assert!(!remove_dir_all(&nested).await.unwrap());

        let file = dir.path().join("f");
        std::fs::write(&file, b"x").unwrap();
        assert!(remove_file(&file).await.unwrap());
        assert!(!remove_file(&file).await.unwrap());
    }

    #[tokio::test]
    async fn replace_file_overwrites_target() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("signed.apk");
        let to = dir.path().join("dist/app-release.apk");
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::write(&to, b"previous release with more bytes").unwrap();
        std::fs::write(&from, b"new").unwrap();

        replace_file(&from, &to).await.unwrap();

        assert_eq!(std::fs::read(&to).unwrap(), b"new");
        assert!(!from.exists());
        assert!(!partial_path(&to).exists());
    }

    #[test]
    fn partial_path_is_sibling() {
        assert_eq!(
            partial_path(Path::new("/out/app-release.apk")),
            PathBuf::from("/out/app-release.apk.partial")
        );
    }
}
