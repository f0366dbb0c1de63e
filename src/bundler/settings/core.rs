//! Core Settings struct and derived artifact paths.

use secrecy::SecretString;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Keystore identity used both to provision the keystore and to sign.
#[derive(Debug)]
pub struct SigningIdentity {
    /// Key alias inside the keystore.
    pub alias: String,
    /// Keystore (store) password.
    pub keystore_password: SecretString,
    /// Per-key password. May equal the keystore password.
    pub key_password: SecretString,
}

/// Immutable settings for one pipeline run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Stages only
/// read from it; the SDK root and command search path are captured at build
/// time so no stage consults the process environment. Tools are only looked
/// up on the captured search path.
#[derive(Debug)]
pub struct Settings {
    pub(super) project_dir: PathBuf,
    pub(super) android_dir: PathBuf,
    pub(super) private_key: PathBuf,
    pub(super) keystore: PathBuf,
    pub(super) keystore_type: String,
    pub(super) identity: SigningIdentity,
    pub(super) distinguished_name: String,
    pub(super) validity_days: u32,
    pub(super) published: PathBuf,
    pub(super) sdk_root: Option<PathBuf>,
    pub(super) search_path: Option<OsString>,
}

impl Settings {
    /// Application project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Android (Gradle) project directory, `<project>/android` by default.
    pub fn android_dir(&self) -> &Path {
        &self.android_dir
    }

    /// PEM private key.
    pub fn private_key(&self) -> &Path {
        &self.private_key
    }

    /// Keystore file, created once and reused.
    pub fn keystore(&self) -> &Path {
        &self.keystore
    }

    /// Destination keystore type passed to keytool (e.g. `JKS`).
    pub fn keystore_type(&self) -> &str {
        &self.keystore_type
    }

    /// Alias and passwords.
    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// Certificate validity in days.
    pub fn validity_days(&self) -> u32 {
        self.validity_days
    }

    /// Final location of the signed APK.
    pub fn published_artifact(&self) -> &Path {
        &self.published
    }

    /// Android SDK root, if one was configured.
    pub fn sdk_root(&self) -> Option<&Path> {
        self.sdk_root.as_deref()
    }

    /// Command search path used to resolve tools outside the SDK.
    pub fn search_path(&self) -> Option<&std::ffi::OsStr> {
        self.search_path.as_deref()
    }

    /// Output directory of the release APK.
    pub fn apk_output_dir(&self) -> PathBuf {
        self.android_dir.join("app/build/outputs/apk/release")
    }

    /// APK produced by the release build.
    pub fn unsigned_artifact(&self) -> PathBuf {
        self.apk_output_dir().join("app-release-unsigned.apk")
    }

    /// Signed APK before publication.
    pub fn signed_artifact(&self) -> PathBuf {
        self.apk_output_dir().join("app-release-signed.apk")
    }

    /// Build output directories removed before every build.
    pub fn stale_build_dirs(&self) -> Vec<PathBuf> {
        ["app/build/intermediates", "app/build/outputs", "build/intermediates", "build/outputs"]
            .iter()
            .map(|rel| self.android_dir.join(rel))
            .collect()
    }

    /// Native (CMake/ndk-build) cache directory.
    pub fn native_build_cache(&self) -> PathBuf {
        self.android_dir.join("app/.cxx")
    }

    /// Ephemeral self-signed certificate, next to the keystore.
    pub fn certificate_path(&self) -> PathBuf {
        self.ephemeral_path("cert.pem")
    }

    /// Ephemeral PKCS12 bundle, next to the keystore.
    pub fn pkcs12_path(&self) -> PathBuf {
        self.ephemeral_path("p12")
    }

    /// Subject for the full distinguished-name attempt.
    pub fn full_subject(&self) -> String {
        format!("{}/CN={}", self.distinguished_name, self.identity.alias)
    }

    /// Single-field subject used when the full one is rejected.
    pub fn minimal_subject(&self) -> String {
        format!("/CN={}", self.identity.alias)
    }

    fn ephemeral_path(&self, suffix: &str) -> PathBuf {
        let dir = self.keystore.parent().unwrap_or_else(|| Path::new("."));
        dir.join(format!(".{}.{}", self.identity.alias, suffix))
    }
}
