//! Capability interfaces over the external tools the pipeline drives.
//!
//! Stages only talk to these traits, so tests can substitute fakes for
//! OpenSSL, keytool, Gradle and apksigner without spawning processes.
//!
//! - [`CertificateAuthority`] - self-signed certificate and PKCS12 export (OpenSSL)
//! - [`KeystoreConverter`] - PKCS12 to keystore import (keytool)
//! - [`ArtifactBuilder`] - release build (Gradle wrapper)
//! - [`Signer`] - APK signing and verification (apksigner)

mod apksigner;
mod gradle;
mod keytool;
mod openssl;
mod process;

pub use apksigner::ApkSigner;
pub use gradle::GradleWrapper;
pub use keytool::Keytool;
pub use openssl::OpenSsl;

use crate::bundler::{Result, Settings};
use async_trait::async_trait;
use secrecy::SecretString;
use std::path::Path;

/// Inputs for bundling key and certificate into PKCS12.
#[derive(Debug)]
pub struct Pkcs12Request<'a> {
    pub certificate: &'a Path,
    pub private_key: &'a Path,
    pub output: &'a Path,
    pub alias: &'a str,
    pub password: &'a SecretString,
}

/// Inputs for converting PKCS12 into the destination keystore.
#[derive(Debug)]
pub struct ImportRequest<'a> {
    pub source: &'a Path,
    pub source_password: &'a SecretString,
    pub destination: &'a Path,
    pub destination_type: &'a str,
    pub destination_password: &'a SecretString,
    pub key_password: &'a SecretString,
    pub alias: &'a str,
}

/// Inputs for signing an APK.
#[derive(Debug)]
pub struct SignRequest<'a> {
    pub keystore: &'a Path,
    pub keystore_password: &'a SecretString,
    pub alias: &'a str,
    pub key_password: &'a SecretString,
    pub input: &'a Path,
    pub output: &'a Path,
}

/// Certificate and PKCS12 utility.
#[async_trait]
pub trait CertificateAuthority: Send + Sync {
    /// Fails with `ToolNotFound` when the utility is not installed.
    fn ensure_available(&self) -> Result<()>;

    /// Writes a self-signed X.509 certificate for `private_key` to `output`.
    async fn self_sign(
        &self,
        private_key: &Path,
        output: &Path,
        subject: &str,
        validity_days: u32,
    ) -> Result<()>;

    /// Bundles key and certificate into a non-iterated PKCS12 container.
    async fn export_pkcs12(&self, request: &Pkcs12Request<'_>) -> Result<()>;
}

/// Keystore conversion utility.
#[async_trait]
pub trait KeystoreConverter: Send + Sync {
    /// Fails with `ToolNotFound` when the utility is not installed.
    fn ensure_available(&self) -> Result<()>;

    /// Imports a PKCS12 container into the destination keystore without prompting.
    async fn import_pkcs12(&self, request: &ImportRequest<'_>) -> Result<()>;
}

/// Release build tool.
#[async_trait]
pub trait ArtifactBuilder: Send + Sync {
    /// Runs a release build in `android_dir` without its clean phase or daemon.
    async fn build_release(&self, android_dir: &Path) -> Result<()>;
}

/// Platform signer.
///
/// `tool` is the executable found by the signer locator.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Signs `request.input` into `request.output`.
    async fn sign(&self, tool: &Path, request: &SignRequest<'_>) -> Result<()>;

    /// Verifies the signature of `artifact`.
    async fn verify(&self, tool: &Path, artifact: &Path) -> Result<()>;
}

/// The set of external collaborators one pipeline run uses.
pub struct Toolchain {
    pub authority: Box<dyn CertificateAuthority>,
    pub converter: Box<dyn KeystoreConverter>,
    pub builder: Box<dyn ArtifactBuilder>,
    pub signer: Box<dyn Signer>,
}

impl Toolchain {
    /// OpenSSL, keytool, the Gradle wrapper and apksigner, resolved against
    /// the settings' search path.
    pub fn system(settings: &Settings) -> Self {
        let search_path = settings.search_path().map(|p| p.to_os_string());
        Self {
            authority: Box::new(OpenSsl::new(search_path.clone())),
            converter: Box::new(Keytool::new(search_path.clone())),
            builder: Box::new(GradleWrapper::new(search_path)),
            signer: Box::new(ApkSigner),
        }
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain").finish_non_exhaustive()
    }
}
