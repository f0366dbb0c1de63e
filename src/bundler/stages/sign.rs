//! Signing and signature verification.

use crate::bundler::{
    Error, Result, Settings,
    tools::{SignRequest, Signer},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Signs the unsigned APK and verifies the result.
///
/// Returns the signed (not yet published) artifact. A signed artifact that
/// fails verification stays on disk for inspection and is never published.
pub async fn sign_and_verify(
    settings: &Settings,
    tool: &Path,
    signer: &dyn Signer,
    unsigned: &Path,
) -> Result<PathBuf> {
    let signed = settings.signed_artifact();
    if fs::remove_file(&signed).await? {
        log::debug!("Removed stale signed artifact {}", signed.display());
    }

    let identity = settings.identity();
    signer
        .sign(
            tool,
            &SignRequest {
                keystore: settings.keystore(),
                keystore_password: &identity.keystore_password,
                alias: &identity.alias,
                key_password: &identity.key_password,
                input: unsigned,
                output: &signed,
            },
        )
        .await
        .map_err(|e| match e {
            Error::SigningFailed { .. } => e,
            other => {
                log::error!("apksigner sign could not run: {}", other);
                Error::SigningFailed {
                    path: signed.clone(),
                }
            }
        })?;

    if !fs::is_file(&signed).await {
        return Err(Error::SigningFailed { path: signed });
    }
    log::info!("✓ Signed {}", signed.display());

    if let Err(e) = signer.verify(tool, &signed).await {
        log::warn!(
            "Leaving unverified signed artifact at {} for inspection",
            signed.display()
        );
        return Err(match e {
            Error::VerificationFailed { .. } => e,
            other => {
                log::error!("apksigner verify could not run: {}", other);
                Error::VerificationFailed { path: signed }
            }
        });
    }
    log::info!("✓ Signature verified");

    Ok(signed)
}
