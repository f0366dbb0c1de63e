//! Main release orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the release
//! stages in order and stops at the first failure.

use crate::bundler::{
    Settings, Stage,
    error::{ErrorExt, StageContext, StageResult},
    stages::{self, KeystoreStatus},
    tools::Toolchain,
};
use std::path::{Path, PathBuf};

use super::checksum::calculate_sha256;

/// Published release artifact.
#[derive(Debug, Clone)]
pub struct ReleaseArtifact {
    /// Final published path.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub checksum: String,
    /// Whether the keystore was created by this run.
    pub keystore: KeystoreStatus,
}

/// Release pipeline orchestrator.
///
/// Runs, strictly in order:
///
/// 1. private key lookup
/// 2. keystore provisioning
/// 3. release build
/// 4. apksigner lookup
/// 5. signing and verification
/// 6. publication
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_android::bundler::{Bundler, Settings, Toolchain};
///
/// # async fn example(settings: Settings) -> kodegen_bundler_android::bundler::StageResult<()> {
/// let toolchain = Toolchain::system(&settings);
/// let bundler = Bundler::new(settings, toolchain);
/// let artifact = bundler.run().await?;
/// println!("Published {} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    toolchain: Toolchain,
}

impl Bundler {
    /// Creates a bundler over the given settings and tools.
    pub fn new(settings: Settings, toolchain: Toolchain) -> Self {
        Self { settings, toolchain }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole pipeline.
    ///
    /// A failure is reported under the stage that was running when it
    /// happened.
    pub async fn run(&self) -> StageResult<ReleaseArtifact> {
        self.run_with(|_, _| {}).await
    }

    /// Runs the whole pipeline, calling `progress` as each stage starts.
    pub async fn run_with<F>(&self, mut progress: F) -> StageResult<ReleaseArtifact>
    where
        F: FnMut(Stage, &str),
    {
        let settings = &self.settings;
        let tools = &self.toolchain;

        progress(Stage::KeyMaterial, "Resolving private key");
        stages::resolve_private_key(settings)
            .await
            .in_stage(Stage::KeyMaterial)?;

        progress(Stage::Keystore, "Provisioning keystore");
        let keystore =
            stages::provision_keystore(settings, tools.authority.as_ref(), tools.converter.as_ref())
                .await
                .in_stage(Stage::Keystore)?;

        progress(Stage::Build, "Building release APK");
        let unsigned = stages::build_release_artifact(settings, tools.builder.as_ref())
            .await
            .in_stage(Stage::Build)?;

        progress(Stage::SignerLookup, "Locating apksigner");
        let signer_tool = stages::locate_signer(settings)
            .await
            .in_stage(Stage::SignerLookup)?;

        progress(Stage::Signing, "Signing and verifying");
        let signed =
            stages::sign_and_verify(settings, &signer_tool, tools.signer.as_ref(), &unsigned)
                .await
                .in_stage(Stage::Signing)?;

        progress(Stage::Publish, "Publishing");
        let (path, size, checksum) = self.publish(&signed).await.in_stage(Stage::Publish)?;
        log::info!("SHA256 {}  {}", checksum, path.display());

        Ok(ReleaseArtifact {
            path,
            size,
            checksum,
            keystore,
        })
    }

    async fn publish(&self, signed: &Path) -> crate::bundler::Result<(PathBuf, u64, String)> {
        let path = stages::publish(&self.settings, signed).await?;
        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading published artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;
        Ok((path, size, checksum))
    }
}
