//! apksigner sign / verify.

use super::{SignRequest, Signer, process};
use crate::bundler::error::{Error, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::path::Path;
use tokio::process::Command;

const KS_PASS_VAR: &str = "KODEGEN_KS_PASSWORD";
const KEY_PASS_VAR: &str = "KODEGEN_KEY_PASSWORD";

/// Android SDK `apksigner`. The executable comes from the signer locator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApkSigner;

#[async_trait]
impl Signer for ApkSigner {
    async fn sign(&self, tool: &Path, request: &SignRequest<'_>) -> Result<()> {
        let mut cmd = Command::new(tool);
        cmd.args(["sign", "--ks"])
            .arg(request.keystore)
            .arg("--ks-pass")
            .arg(format!("env:{KS_PASS_VAR}"))
            .args(["--ks-key-alias", request.alias])
            .arg("--key-pass")
            .arg(format!("env:{KEY_PASS_VAR}"))
            .arg("--out")
            .arg(request.output)
            .arg(request.input)
            .env(KS_PASS_VAR, request.keystore_password.expose_secret())
            .env(KEY_PASS_VAR, request.key_password.expose_secret());

        let status = process::run_inherited(&mut cmd, "apksigner sign").await?;
        if !status.success() {
            log::error!("apksigner sign exited with {}", status);
            return Err(Error::SigningFailed {
                path: request.output.to_path_buf(),
            });
        }
        Ok(())
    }

    async fn verify(&self, tool: &Path, artifact: &Path) -> Result<()> {
        let mut cmd = Command::new(tool);
        cmd.args(["verify", "--verbose"]).arg(artifact);

        let status = process::run_inherited(&mut cmd, "apksigner verify").await?;
        if !status.success() {
            log::error!("apksigner verify exited with {}", status);
            return Err(Error::VerificationFailed {
                path: artifact.to_path_buf(),
            });
        }
        Ok(())
    }
}
