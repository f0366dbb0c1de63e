//! Android release signing pipeline library
//!
//! Orchestrates OpenSSL, keytool, Gradle and apksigner to:
//! - convert a PEM private key into a keystore (once)
//! - build the release APK
//! - sign and verify it
//! - publish it to a fixed path
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
