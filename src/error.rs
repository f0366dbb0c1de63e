//! Top-level error types for the CLI.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type at the binary boundary
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline stage failed
    #[error("{0}")]
    Pipeline(#[from] crate::bundler::StageError),

    /// Settings or config file could not be resolved
    #[error("{0}")]
    Settings(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Config file passed with --config does not exist
    #[error("Config file not found: {path}")]
    MissingConfig {
        /// Path given on the command line
        path: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::{Error, StageError};

        let BundlerError::Pipeline(StageError { source, .. }) = self else {
            return Vec::new();
        };
        match source {
            Error::MissingKey { path } => vec![format!(
                "Place the PEM private key at {} or pass --private-key",
                path.display()
            )],
            Error::SignerNotFound { .. } => vec![
                "Set ANDROID_HOME (or ANDROID_SDK_ROOT) to an SDK with build-tools installed"
                    .to_string(),
                "Or add a directory containing apksigner to PATH".to_string(),
            ],
            Error::VerificationFailed { path } => vec![format!(
                "The unverified artifact was left at {} for inspection",
                path.display()
            )],
            Error::BuildArtifactMissing { .. } => vec![
                "Check the Gradle output above; the release variant may be signed or renamed by the build script"
                    .to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
