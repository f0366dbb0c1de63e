//! Android release signing pipeline.
//!
//! Converts a PEM private key into a keystore (once), builds the release APK,
//! signs and verifies it with apksigner and publishes it to a fixed path.
//!
//! - [`settings`] - immutable configuration
//! - [`stages`] - the pipeline stages
//! - [`tools`] - capability traits over OpenSSL, keytool, Gradle and apksigner
//! - [`builder`] - the [`Bundler`] orchestrator

pub mod builder;
pub mod error;
pub mod settings;
pub mod stages;
pub mod tools;
pub mod utils;

pub use builder::{Bundler, ReleaseArtifact};
pub use error::{Error, Result, Stage, StageError, StageResult};
pub use settings::{PasswordSource, ReleaseConfig, Settings, SettingsBuilder, SigningIdentity};
pub use stages::KeystoreStatus;
pub use tools::{
    ArtifactBuilder, CertificateAuthority, ImportRequest, KeystoreConverter, Pkcs12Request,
    SignRequest, Signer, Toolchain,
};
