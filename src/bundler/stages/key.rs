//! Private key lookup.

use crate::bundler::{Error, Result, Settings, utils::fs};
use std::path::PathBuf;

/// Confirms the configured PEM private key exists.
pub async fn resolve_private_key(settings: &Settings) -> Result<PathBuf> {
    let key = settings.private_key();
    if !fs::is_file(key).await {
        return Err(Error::MissingKey {
            path: key.to_path_buf(),
        });
    }
    log::debug!("Using private key {}", key.display());
    Ok(key.to_path_buf())
}
