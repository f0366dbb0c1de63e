//! Error types for the release signing pipeline.
//!
//! Every failure carries enough context (stage, path, tool) to tell the user
//! which step of the pipeline stopped the release and where to look.

use std::{
    fmt,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Private key lookup.
    KeyMaterial,
    /// PEM to keystore conversion.
    Keystore,
    /// Release build.
    Build,
    /// apksigner discovery.
    SignerLookup,
    /// Signing and signature verification.
    Signing,
    /// Moving the verified artifact into place.
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::KeyMaterial => "key",
            Stage::Keystore => "keystore",
            Stage::Build => "build",
            Stage::SignerLookup => "signer",
            Stage::Signing => "sign",
            Stage::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// Main error type for pipeline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured private key does not exist.
    #[error("private key not found at {}", path.display())]
    MissingKey {
        /// Configured key path.
        path: PathBuf,
    },

    /// A required external tool is not installed.
    #[error("required tool `{tool}` not found. {hint}")]
    ToolNotFound {
        /// Tool binary name.
        tool: String,
        /// Installation guidance.
        hint: String,
    },

    /// A certificate, PKCS12 or keystore utility returned a non-zero exit.
    #[error("keystore creation failed during {step}: {detail}")]
    KeystoreCreation {
        /// Step that failed (e.g. "certificate generation").
        step: String,
        /// Exit status and captured stderr.
        detail: String,
    },

    /// The build tool itself reported failure.
    #[error("release build failed ({status})")]
    BuildFailed {
        /// Exit status of the build tool.
        status: ExitStatus,
    },

    /// The build finished but the unsigned artifact is not where expected.
    #[error("build finished but unsigned artifact is missing: {}", path.display())]
    BuildArtifactMissing {
        /// Expected unsigned artifact path.
        path: PathBuf,
    },

    /// apksigner could not be found in the SDK or on PATH.
    #[error(
        "apksigner not found (searched {searched}). Set ANDROID_HOME to an SDK with build-tools installed, or add apksigner to PATH"
    )]
    SignerNotFound {
        /// Human readable list of locations searched.
        searched: String,
    },

    /// Signing did not produce the signed artifact.
    #[error("signing failed, expected signed artifact at {}", path.display())]
    SigningFailed {
        /// Expected signed artifact path.
        path: PathBuf,
    },

    /// The signed artifact failed signature verification.
    #[error("signature verification failed for {}", path.display())]
    VerificationFailed {
        /// Signed artifact that failed verification.
        path: PathBuf,
    },

    /// An external command could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command name.
        command: String,
        /// Spawn error.
        error: std::io::Error,
    },

    /// IO error with the operation and path that caused it.
    #[error("{context} ({}): {error}", path.display())]
    Fs {
        /// Operation being performed.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        error: std::io::Error,
    },

    /// Plain IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Failure of one pipeline stage.
///
/// The stage is the one that was running when `source` was raised, as
/// recorded by the orchestrator.
#[derive(Error, Debug)]
#[error("[{stage}] {source}")]
pub struct StageError {
    /// Stage that failed.
    pub stage: Stage,
    /// What went wrong.
    #[source]
    pub source: Error,
}

/// Result of a whole pipeline run.
pub type StageResult<T> = std::result::Result<T, StageError>;

/// Attribute a stage error to the stage that produced it.
pub trait StageContext<T> {
    /// Tag the error with `stage`.
    fn in_stage(self, stage: Stage) -> StageResult<T>;
}

impl<T> StageContext<T> for Result<T> {
    fn in_stage(self, stage: Stage) -> StageResult<T> {
        self.map_err(|source| StageError { stage, source })
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap the error with the operation and path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Convert a missing value into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Attach a static message.
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}
